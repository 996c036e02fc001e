use chrono::{DateTime, NaiveDate};
use roster::{AccessLevel, Collection, MembershipRecord, Viewer};
use std::fmt::Write;

/// Everything a page needs besides its route parameter.
pub struct PageContext<'a> {
    pub viewer: &'a Viewer,
    pub access_level: AccessLevel,
    /// `None` when no product is configured and nothing was collected.
    pub product_id: Option<&'a str>,
    pub collection: Option<&'a Collection>,
    pub development: bool,
}

impl PageContext<'_> {
    pub fn member_count(&self) -> usize {
        self.collection.map(Collection::len).unwrap_or(0)
    }

    pub fn memberships(&self) -> &[MembershipRecord] {
        self.collection.map(Collection::memberships).unwrap_or(&[])
    }
}

/// Which of the two pages is being rendered.
#[derive(Clone, Copy)]
pub enum PageKind {
    Dashboard,
    Experience,
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render an opaque upstream timestamp as a calendar date when it can be parsed.
pub fn format_joined(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return "Unknown".to_string();
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Some(ts) = raw
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
    {
        return ts.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

pub fn greeting(ctx: &PageContext<'_>, kind: PageKind) -> String {
    let have = if ctx.access_level.has_access() {
        "have"
    } else {
        "do not have"
    };
    let name = escape_html(ctx.viewer.display_name());
    match kind {
        PageKind::Dashboard => format!(
            "Hi <strong>{name}</strong>, you <strong>{have} access</strong> to this company. \
             Your access level: <strong>{}</strong>",
            ctx.access_level
        ),
        PageKind::Experience => format!(
            "Hi <strong>{name}</strong>, you {have} access. Access level: <strong>{}</strong>",
            ctx.access_level
        ),
    }
}

pub fn member_card(member: &MembershipRecord, kind: PageKind) -> String {
    let customer = &member.customer;
    let (card_class, avatar_class) = match kind {
        PageKind::Dashboard => (
            "bg-white rounded-md border p-4 shadow-sm",
            "w-12 h-12 rounded-full",
        ),
        PageKind::Experience => ("rounded border bg-gray-50 p-4", "w-10 h-10 rounded-full"),
    };
    let username = customer.username.as_deref().filter(|u| !u.is_empty());
    let email = customer.email.as_deref().filter(|e| !e.is_empty());

    let mut html = String::new();
    let _ = write!(
        html,
        "<div class=\"{card_class}\" data-membership-id=\"{}\">",
        escape_html(&member.id)
    );

    match customer.avatar_url() {
        Some(url) => {
            let alt = match kind {
                PageKind::Dashboard => format!("{}'s profile", customer.display_name()),
                PageKind::Experience => customer.display_name().to_string(),
            };
            let _ = write!(
                html,
                "<img src=\"{}\" alt=\"{}\" class=\"{avatar_class} object-cover\">",
                escape_html(url),
                escape_html(&alt)
            );
        }
        None => {
            let _ = write!(
                html,
                "<div class=\"{avatar_class} bg-gray-300\"><span>{}</span></div>",
                escape_html(&customer.initial().to_string())
            );
        }
    }

    let _ = write!(
        html,
        "<div class=\"flex-1 min-w-0\"><p class=\"member-name\">{}</p>",
        escape_html(customer.display_name())
    );
    match kind {
        PageKind::Dashboard => {
            if let Some(username) = username {
                let _ = write!(
                    html,
                    "<span class=\"member-username\">@{}</span>",
                    escape_html(username)
                );
            }
            let _ = write!(
                html,
                "<p class=\"member-email\">{}</p><p class=\"member-joined\">Joined: {}</p></div>",
                escape_html(email.unwrap_or("No email")),
                escape_html(&format_joined(member.created_at.as_deref()))
            );
        }
        PageKind::Experience => {
            let _ = write!(
                html,
                "<p class=\"member-contact\">@{} &middot; {}</p></div>",
                escape_html(username.unwrap_or("unknown")),
                escape_html(email.unwrap_or("no email"))
            );
        }
    }
    let _ = write!(
        html,
        "<span class=\"status-badge\">{}</span></div>",
        escape_html(&member.status)
    );
    html
}

/// Shown when a page request failed part way through the listing.
pub fn truncation_notice(ctx: &PageContext<'_>) -> String {
    match ctx.collection.and_then(Collection::failed_page) {
        Some(page) => format!(
            "<div class=\"truncation-notice\" role=\"status\">\
             <p>The member list may be incomplete: loading stopped at page {page}.</p></div>"
        ),
        None => String::new(),
    }
}

pub fn debug_panel(ctx: &PageContext<'_>, resource: &str) -> String {
    if !ctx.development {
        return String::new();
    }
    format!(
        "<div class=\"debug-info\"><h3>Debug Info</h3>\
         <p>User ID: {}</p><p>Username: @{}</p><p>Product ID: {}</p><p>{}</p></div>",
        escape_html(&ctx.viewer.user_id),
        escape_html(ctx.viewer.username.as_deref().unwrap_or("")),
        escape_html(ctx.product_id.unwrap_or("Not set")),
        escape_html(resource)
    )
}
