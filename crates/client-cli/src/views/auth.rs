//! Login, registration, and profile screens.

use anyhow::Result;
use shared::{ProfileUpdate, RegisterPayload, Role, User};

use crate::nav;
use crate::term;
use crate::validate::{
    validate_date, validate_email, validate_image_url, validate_password, validate_required,
    Validator,
};

use super::Ctx;

fn show_landing(user: &User) {
    term::success(&format!("Welcome, {}!", user.name));
    term::notice("Where to next:");
    for item in nav::menu_for(Some(user)) {
        println!("  {:<20} assetverse {}", item.label, item.command);
    }
}

pub async fn login(ctx: &Ctx, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = match email {
        Some(e) => e,
        None => term::prompt_line("Email")?,
    };
    let password = match password {
        Some(p) => p,
        None => term::prompt_line("Password")?,
    };

    let mut validator = Validator::new();
    validator
        .check("email", validate_email(&email))
        .check("password", validate_required(&password, "Password"));
    if let Err(errors) = validator.finish() {
        term::show_field_errors(&errors);
        return Ok(());
    }

    match ctx.session.login(&email, &password).await {
        Ok(user) => show_landing(&user),
        // the server's own message (wrong password etc.) is shown untouched
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

pub async fn logout(ctx: &Ctx) -> Result<()> {
    ctx.session.logout().await;
    term::success("Logged out");
    Ok(())
}

pub async fn whoami(ctx: &Ctx) -> Result<()> {
    match ctx.session.current_user() {
        Some(user) => {
            println!("\x1b[32m✓ Logged in\x1b[0m");
            println!("Name:    {}", user.name);
            println!("Email:   {}", user.email);
            println!("Role:    {}", user.role);
            if let Some(company) = &user.company_name {
                println!("Company: {}", company);
            }
            if let (Some(current), Some(limit)) = (user.current_employees, user.employee_limit) {
                println!("Team:    {}/{} employees", current, limit);
            }
        }
        None => {
            println!("\x1b[33m✗ Not logged in\x1b[0m");
            println!("Run '\x1b[1massetverse login\x1b[0m' to authenticate");
        }
    }
    Ok(())
}

pub struct RegisterArgs {
    pub name: String,
    pub email: String,
    pub password: String,
    pub date_of_birth: String,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
}

pub async fn register(ctx: &Ctx, role: Role, args: RegisterArgs) -> Result<()> {
    let mut validator = Validator::new();
    validator
        .check("name", validate_required(&args.name, "Full name"))
        .check("email", validate_email(&args.email))
        .check("password", validate_password(&args.password))
        .check(
            "date-of-birth",
            validate_date(&args.date_of_birth, "Date of birth"),
        );
    if role == Role::Hr {
        validator
            .check(
                "company-name",
                validate_required(args.company_name.as_deref().unwrap_or(""), "Company name"),
            )
            .check(
                "company-logo",
                validate_image_url(
                    args.company_logo.as_deref().unwrap_or(""),
                    "Company logo",
                ),
            );
    }
    if let Err(errors) = validator.finish() {
        term::show_field_errors(&errors);
        return Ok(());
    }

    let payload = RegisterPayload {
        name: args.name,
        email: args.email,
        password: args.password,
        date_of_birth: args.date_of_birth,
        role,
        company_name: if role == Role::Hr { args.company_name } else { None },
        company_logo: if role == Role::Hr { args.company_logo } else { None },
    };

    match ctx.session.register(&payload).await {
        Ok(user) => {
            term::success("Registration successful");
            show_landing(&user);
        }
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

pub async fn profile_show(ctx: &Ctx) -> Result<()> {
    match ctx.session.current_user() {
        Some(user) => {
            println!("Name:          {}", user.name);
            println!("Email:         {}", user.email);
            println!("Role:          {}", user.role);
            if let Some(dob) = &user.date_of_birth {
                println!("Date of birth: {}", dob);
            }
            if let Some(image) = &user.profile_image {
                println!("Photo:         {}", image);
            }
            if user.is_hr() {
                if let Some(company) = &user.company_name {
                    println!("Company:       {}", company);
                }
                if let Some(logo) = &user.company_logo {
                    println!("Logo:          {}", logo);
                }
                if let Some(package) = &user.package_name {
                    println!("Package:       {}", package);
                }
            }
        }
        None => term::warn("Not logged in."),
    }
    Ok(())
}

/// Profile update stays on the profile screen: on success it prints the
/// confirmation and the refreshed identity instead of navigating away.
pub async fn profile_update(
    ctx: &Ctx,
    name: Option<String>,
    profile_image: Option<String>,
    company_logo: Option<String>,
) -> Result<()> {
    let update = ProfileUpdate {
        name,
        profile_image,
        company_logo,
    };
    if update.is_empty() {
        term::warn("Nothing to update: pass --name, --photo, or --company-logo.");
        return Ok(());
    }

    let mut validator = Validator::new();
    if let Some(name) = &update.name {
        validator.check("name", validate_required(name, "Name"));
    }
    if let Some(image) = &update.profile_image {
        validator.check("photo", validate_image_url(image, "Photo"));
    }
    if let Some(logo) = &update.company_logo {
        validator.check("company-logo", validate_image_url(logo, "Company logo"));
    }
    if let Err(errors) = validator.finish() {
        term::show_field_errors(&errors);
        return Ok(());
    }

    match ctx.session.update_user(&update).await {
        Ok(_) => {
            term::success("Profile updated");
            profile_show(ctx).await?;
        }
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}
