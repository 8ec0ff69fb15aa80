//! HR asset inventory: list, add, delete.

use anyhow::Result;
use shared::{Asset, AssetType, NewAsset};

use crate::query::{InvalidationSet, ListController, DEFAULT_PAGE_SIZE};
use crate::term;
use crate::validate::{validate_image_url, validate_quantity, validate_required, Validator};

use super::{cell, fetch_into, fmt_date, render_pagination, Ctx};

pub const ENDPOINT: &str = "/assets";

pub struct ListArgs {
    pub search: Option<String>,
    pub kind: Option<AssetType>,
    pub sort: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            search: None,
            kind: None,
            sort: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

fn controller(args: &ListArgs) -> ListController<Asset> {
    let mut ctl = ListController::new(ENDPOINT, args.limit);
    if let Some(search) = &args.search {
        ctl.set_search(search);
    }
    ctl.set_kind(args.kind);
    ctl.set_sort(args.sort.clone());
    // page last: filters above reset it
    ctl.set_page(args.page);
    ctl
}

fn render(ctl: &ListController<Asset>) {
    let page = ctl.data();
    if page.is_empty() {
        term::empty_state(
            "assets",
            "Run 'assetverse assets add' to add your first asset.",
        );
        return;
    }

    println!(
        "\x1b[1m{} {} {} {} {}\x1b[0m",
        cell("NAME", 24),
        cell("TYPE", 16),
        cell("AVAILABLE", 10),
        cell("TOTAL", 6),
        cell("ADDED", 10),
    );
    for asset in &page.items {
        println!(
            "{} {} {} {} {}",
            cell(&asset.name, 24),
            cell(&asset.asset_type.to_string(), 16),
            cell(&asset.available_quantity.to_string(), 10),
            cell(&asset.quantity.to_string(), 6),
            cell(&fmt_date(&asset.created_at), 10),
        );
    }
    render_pagination(ctl);
}

pub async fn list(ctx: &Ctx, args: ListArgs) -> Result<()> {
    let mut ctl = controller(&args);
    match fetch_into(&ctx.secure, &mut ctl).await {
        Ok(()) => render(&ctl),
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

pub async fn add(
    ctx: &Ctx,
    name: String,
    image: String,
    asset_type: AssetType,
    quantity: u32,
) -> Result<()> {
    // violations never reach the network layer
    if let Err(errors) = validate_new_asset(&name, &image, quantity) {
        term::show_field_errors(&errors);
        return Ok(());
    }

    let payload = NewAsset {
        name,
        asset_type,
        quantity,
        image,
    };
    match ctx.secure.post::<Asset, _>(ENDPOINT, &payload).await {
        Ok(asset) => {
            term::success(&format!("Asset '{}' created", asset.name));
            // destination on success: the asset list, freshly fetched
            let mut invalidations = InvalidationSet::default();
            invalidations.invalidate(ENDPOINT);
            let mut ctl = controller(&ListArgs::default());
            if invalidations.claim(&ctl.cache_key()) {
                if fetch_into(&ctx.secure, &mut ctl).await.is_ok() {
                    render(&ctl);
                }
            }
        }
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

fn validate_new_asset(name: &str, image: &str, quantity: u32) -> Result<(), Vec<crate::validate::FieldError>> {
    let mut validator = Validator::new();
    validator
        .check("name", validate_required(name, "Name"))
        .check("image", validate_image_url(image, "Image"))
        .check("quantity", validate_quantity(quantity));
    validator.finish()
}

pub async fn delete(ctx: &Ctx, id: String, assume_yes: bool) -> Result<()> {
    if !term::confirm(
        "This permanently deletes the asset and its availability.",
        assume_yes,
    )? {
        term::notice("Cancelled, nothing deleted.");
        return Ok(());
    }

    match ctx.secure.delete(&format!("{ENDPOINT}/{id}")).await {
        Ok(msg) => {
            term::success(msg.message_or("Asset deleted"));
            let mut ctl = controller(&ListArgs::default());
            if fetch_into(&ctx.secure, &mut ctl).await.is_ok() {
                render(&ctl);
            }
        }
        Err(err) => term::report_api_error(&err),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_form_rejects_zero_quantity_and_missing_image() {
        let errors = validate_new_asset("Laptop", "", 0).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["image", "quantity"]);
    }

    #[test]
    fn test_add_form_accepts_valid_input() {
        assert!(validate_new_asset("Laptop", "https://img.example/laptop.png", 5).is_ok());
    }
}
