//! Request screens: the HR review queue and the employee's own requests.

use anyhow::Result;
use shared::{AssetRequest, NewRequest, RequestDecision, RequestKind, RequestStatus};

use crate::query::{ListController, DEFAULT_PAGE_SIZE};
use crate::term;
use crate::validate::{validate_required, Validator};

use super::{cell, fetch_into, fmt_date, render_pagination, Ctx};

pub const ENDPOINT: &str = "/requests";
pub const MY_ENDPOINT: &str = "/requests/my-requests";

fn render(ctl: &ListController<AssetRequest>, mine: bool) {
    let page = ctl.data();
    if page.is_empty() {
        if mine {
            term::empty_state(
                "requests",
                "Run 'assetverse assets browse' to request your first asset.",
            );
        } else {
            term::empty_state(
                "requests",
                "Requests appear here when employees ask for assets.",
            );
        }
        return;
    }

    println!(
        "\x1b[1m{} {} {} {} {} {}\x1b[0m",
        cell("ID", 26),
        cell("ASSET", 20),
        cell("REQUESTER", 22),
        cell("KIND", 8),
        cell("STATUS", 9),
        cell("DATE", 10),
    );
    for request in &page.items {
        let status = match request.status {
            RequestStatus::Pending => "\x1b[33mpending \x1b[0m ",
            RequestStatus::Approved => "\x1b[32mapproved\x1b[0m ",
            RequestStatus::Rejected => "\x1b[31mrejected\x1b[0m ",
        };
        println!(
            "{} {} {} {} {} {}",
            cell(&request.id, 26),
            cell(&request.asset.name, 20),
            cell(&request.requester.name, 22),
            cell(&request.request_type.to_string(), 8),
            status,
            cell(&fmt_date(&request.request_date), 10),
        );
        if let Some(note) = &request.note {
            if !note.is_empty() {
                println!("\x1b[90m    note: {}\x1b[0m", note);
            }
        }
    }
    render_pagination(ctl);
}

pub async fn list(ctx: &Ctx, search: Option<String>, page: u32) -> Result<()> {
    let mut ctl = ListController::new(ENDPOINT, DEFAULT_PAGE_SIZE);
    if let Some(search) = &search {
        ctl.set_search(search);
    }
    ctl.set_page(page);
    match fetch_into(&ctx.secure, &mut ctl).await {
        Ok(()) => render(&ctl, false),
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

pub async fn mine(ctx: &Ctx, page: u32) -> Result<()> {
    let mut ctl = ListController::new(MY_ENDPOINT, DEFAULT_PAGE_SIZE);
    ctl.set_page(page);
    match fetch_into(&ctx.secure, &mut ctl).await {
        Ok(()) => render(&ctl, true),
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

pub async fn add(ctx: &Ctx, asset_id: String, kind: RequestKind, note: Option<String>) -> Result<()> {
    let note = match note {
        Some(note) => note,
        None => term::prompt_line("Reason for the request")?,
    };

    let mut validator = Validator::new();
    validator
        .check("asset", validate_required(&asset_id, "Asset reference"))
        .check("note", validate_required(&note, "Reason"));
    if let Err(errors) = validator.finish() {
        term::show_field_errors(&errors);
        return Ok(());
    }

    let payload = NewRequest {
        asset_id,
        request_type: kind,
        note,
    };
    match ctx.secure.post::<serde_json::Value, _>(ENDPOINT, &payload).await {
        Ok(_) => {
            term::success("Request sent");
            mine(ctx, 1).await?;
        }
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

/// HR approves or rejects a pending request. Approval is where the package's
/// employee limit bites; the limit error routes to the upgrade prompt.
pub async fn decide(
    ctx: &Ctx,
    id: String,
    status: RequestStatus,
    assume_yes: bool,
) -> Result<()> {
    let consequence = match status {
        RequestStatus::Approved => {
            "Approving assigns the asset and adds the requester to your team."
        }
        RequestStatus::Rejected => "Rejecting closes the request without assigning anything.",
        RequestStatus::Pending => {
            term::warn("Requests can only be approved or rejected.");
            return Ok(());
        }
    };
    if !term::confirm(consequence, assume_yes)? {
        term::notice("Cancelled, request unchanged.");
        return Ok(());
    }

    let decision = RequestDecision { status };
    match ctx
        .secure
        .put::<serde_json::Value, _>(&format!("{ENDPOINT}/{id}"), &decision)
        .await
    {
        Ok(_) => {
            term::success(&format!("Request {status}"));
            list(ctx, None, 1).await?;
        }
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}
