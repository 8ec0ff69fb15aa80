//! The employee's assigned assets.

use anyhow::Result;
use shared::{AssetType, AssignedAsset, NewRequest, RequestKind};

use crate::query::{ListController, DEFAULT_PAGE_SIZE};
use crate::term;

use super::{cell, fetch_into, fmt_date, render_pagination, Ctx};

pub const ENDPOINT: &str = "/assigned-assets";

fn render(ctl: &ListController<AssignedAsset>) {
    let page = ctl.data();
    if page.is_empty() {
        term::empty_state(
            "assigned assets",
            "Run 'assetverse assets browse' to request one.",
        );
        return;
    }

    println!(
        "\x1b[1m{} {} {} {} {}\x1b[0m",
        cell("ID", 26),
        cell("ASSET", 22),
        cell("TYPE", 16),
        cell("COMPANY", 18),
        cell("ASSIGNED", 10),
    );
    for assigned in &page.items {
        println!(
            "{} {} {} {} {}",
            cell(&assigned.id, 26),
            cell(&assigned.asset_name, 22),
            cell(&assigned.asset_type.to_string(), 16),
            cell(&assigned.company_name, 18),
            cell(&fmt_date(&assigned.assignment_date), 10),
        );
    }
    render_pagination(ctl);
}

pub async fn list(
    ctx: &Ctx,
    search: Option<String>,
    kind: Option<AssetType>,
    page: u32,
) -> Result<()> {
    let mut ctl = ListController::new(ENDPOINT, DEFAULT_PAGE_SIZE);
    if let Some(search) = &search {
        ctl.set_search(search);
    }
    ctl.set_kind(kind);
    ctl.set_page(page);
    match fetch_into(&ctx.secure, &mut ctl).await {
        Ok(()) => render(&ctl),
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

/// File a Return request for an assigned asset. Only Returnable items can go
/// back; the assignment itself is released by HR approving the return.
pub async fn return_asset(
    ctx: &Ctx,
    asset_id: String,
    note: Option<String>,
    assume_yes: bool,
) -> Result<()> {
    // look the item up so the gate runs on what the server actually assigned
    let mut ctl: ListController<AssignedAsset> = ListController::new(ENDPOINT, 100);
    if let Err(err) = fetch_into(&ctx.secure, &mut ctl).await {
        term::report_api_error(&err);
        return Ok(());
    }
    let Some(assigned) = ctl.data().items.iter().find(|a| a.id == asset_id) else {
        term::failure("No assigned asset with that id.");
        return Ok(());
    };
    if !assigned.is_returnable() {
        term::failure(&format!(
            "'{}' is {}; it cannot be returned.",
            assigned.asset_name, assigned.asset_type
        ));
        return Ok(());
    }

    if !term::confirm(
        &format!(
            "This files a return request for '{}' with {}.",
            assigned.asset_name, assigned.company_name
        ),
        assume_yes,
    )? {
        term::notice("Cancelled, nothing returned.");
        return Ok(());
    }

    let payload = NewRequest {
        asset_id,
        request_type: RequestKind::Return,
        note: note.unwrap_or_else(|| "Returning assigned asset".to_string()),
    };
    match ctx
        .secure
        .post::<serde_json::Value, _>("/requests", &payload)
        .await
    {
        Ok(_) => {
            term::success("Return request filed");
            list(ctx, None, None, 1).await?;
        }
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}
