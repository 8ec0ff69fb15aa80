//! Team screens: the HR manager's team and the employee's companies.

use anyhow::Result;
use shared::{Company, TeamMember};

use crate::query::{ListController, DEFAULT_PAGE_SIZE};
use crate::term;

use super::{cell, fetch_into, fmt_date, render_pagination, Ctx};

pub const MY_TEAM_ENDPOINT: &str = "/employees/my-team";
pub const TEAM_LIST_ENDPOINT: &str = "/employees/team-list";

fn render_members(ctl: &ListController<TeamMember>, empty_hint: &str) {
    let page = ctl.data();
    if page.is_empty() {
        term::empty_state("team members", empty_hint);
        return;
    }

    println!(
        "\x1b[1m{} {} {} {}\x1b[0m",
        cell("ID", 26),
        cell("NAME", 24),
        cell("EMAIL", 28),
        cell("JOINED", 10),
    );
    for member in &page.items {
        println!(
            "{} {} {} {}",
            cell(&member.id, 26),
            cell(&member.name, 24),
            cell(&member.email, 28),
            cell(&fmt_date(&member.join_date), 10),
        );
    }
    render_pagination(ctl);
}

/// HR: everyone whose request this company has approved.
pub async fn employees_list(ctx: &Ctx, page: u32) -> Result<()> {
    let mut ctl = ListController::new(MY_TEAM_ENDPOINT, DEFAULT_PAGE_SIZE);
    ctl.set_page(page);
    match fetch_into(&ctx.secure, &mut ctl).await {
        Ok(()) => render_members(
            &ctl,
            "Approve an asset request to add your first team member.",
        ),
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

/// HR: remove an employee from the team (their assignments go back to stock
/// server-side).
pub async fn employees_remove(ctx: &Ctx, id: String, assume_yes: bool) -> Result<()> {
    if !term::confirm(
        "This removes the employee from your team and releases their assets.",
        assume_yes,
    )? {
        term::notice("Cancelled, team unchanged.");
        return Ok(());
    }

    match ctx.secure.delete(&format!("/employees/{id}")).await {
        Ok(msg) => {
            term::success(msg.message_or("Employee removed"));
            employees_list(ctx, 1).await?;
        }
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

/// Employee: without a company the endpoint lists affiliations; with
/// `--company <hrId>` it lists that company's members.
pub async fn team_list(ctx: &Ctx, company: Option<String>) -> Result<()> {
    match company {
        None => {
            let mut ctl: ListController<Company> =
                ListController::new(TEAM_LIST_ENDPOINT, DEFAULT_PAGE_SIZE);
            match fetch_into(&ctx.secure, &mut ctl).await {
                Ok(()) => {
                    let page = ctl.data();
                    if page.is_empty() {
                        term::empty_state(
                            "companies",
                            "You join a company when an HR manager approves your request.",
                        );
                        return Ok(());
                    }
                    println!(
                        "\x1b[1m{} {}\x1b[0m",
                        cell("HR ID", 26),
                        cell("COMPANY", 24),
                    );
                    for company in &page.items {
                        println!(
                            "{} {}",
                            cell(&company.hr_id, 26),
                            cell(&company.company_name, 24),
                        );
                    }
                    term::notice("Use 'assetverse team list --company <hr-id>' to see members.");
                }
                Err(err) => term::report_api_error(&err),
            }
        }
        Some(hr_id) => {
            // same endpoint, scoped by hrId; still a normalized list response
            let query = [("hrId", hr_id)];
            match ctx
                .secure
                .get_page::<TeamMember>(TEAM_LIST_ENDPOINT, &query)
                .await
            {
                Ok(page) => {
                    let mut ctl: ListController<TeamMember> =
                        ListController::new(TEAM_LIST_ENDPOINT, DEFAULT_PAGE_SIZE);
                    let ticket = ctl.refetch();
                    ctl.apply(ticket, page);
                    render_members(&ctl, "No colleagues in this company yet.");
                }
                Err(err) => term::report_api_error(&err),
            }
        }
    }
    Ok(())
}
