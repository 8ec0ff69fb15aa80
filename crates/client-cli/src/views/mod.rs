//! One module per screen. Each view fetches through the shared clients,
//! converts failures into terminal feedback, and never lets an error escape
//! unhandled.

pub mod assets;
pub mod auth;
pub mod dashboard;
pub mod my_assets;
pub mod requests;
pub mod subscription;
pub mod team;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::http::{ApiClient, SecureClient};
use crate::query::ListController;
use crate::session::Session;

/// Everything a view needs: the base client (public endpoints and the
/// session's own calls), the secure client (authenticated endpoints), and
/// the one session accessor.
pub struct Ctx {
    pub api: ApiClient,
    pub secure: SecureClient,
    pub session: Session,
    pub config: Config,
}

/// One-shot fetch for a command-style list view: issue a ticket, fetch, and
/// apply. The interactive browser drives the same controller concurrently
/// instead.
pub async fn fetch_into<T: serde::de::DeserializeOwned>(
    secure: &SecureClient,
    ctl: &mut ListController<T>,
) -> Result<(), crate::http::ApiError> {
    let ticket = ctl.refetch();
    let page = secure.get_page(ctl.endpoint(), &ctl.params().to_pairs()).await?;
    ctl.apply(ticket, page);
    Ok(())
}

pub fn fmt_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Left-pad/truncate a cell to a fixed width for tabular output
pub fn cell(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    while out.chars().count() < width {
        out.push(' ');
    }
    out
}

/// Footer for a paginated list
pub fn render_pagination<T>(ctl: &ListController<T>) {
    let params = ctl.params();
    let data = ctl.data();
    if data.pages > 1 {
        println!(
            "\x1b[90mPage {} of {} ({} total)\x1b[0m",
            params.page, data.pages, data.total
        );
    } else {
        println!("\x1b[90mPage {}\x1b[0m", params.page);
    }
    match (ctl.has_prev(), ctl.has_next()) {
        (true, true) => println!("\x1b[90mUse --page {} / --page {} to move.\x1b[0m", params.page - 1, params.page + 1),
        (false, true) => println!("\x1b[90mUse --page {} for more.\x1b[0m", params.page + 1),
        (true, false) => println!("\x1b[90mUse --page {} to go back.\x1b[0m", params.page - 1),
        (false, false) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_pads_and_truncates() {
        assert_eq!(cell("ab", 4), "ab  ");
        assert_eq!(cell("abcdef", 4), "abcd");
        assert_eq!(cell("", 3), "   ");
    }

    #[test]
    fn test_fmt_date() {
        let date: DateTime<Utc> = "2026-01-15T09:30:00Z".parse().unwrap();
        assert_eq!(fmt_date(&date), "2026-01-15");
    }
}
