use super::layout::{
    debug_panel, document, escape_html, greeting, member_card, truncation_notice, PageKind,
    PageContext,
};
use std::fmt::Write;

/// Admin dashboard for a company
pub fn render(company_id: &str, ctx: &PageContext<'_>) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        "<main class=\"dashboard\"><header>\
         <h1>Admin Dashboard</h1><p>Company ID: {}</p><p>{}</p></header>",
        escape_html(company_id),
        greeting(ctx, PageKind::Dashboard)
    );

    let _ = write!(
        body,
        "<section class=\"members\"><h2>Active App Users ({})</h2>",
        ctx.member_count()
    );

    if ctx.product_id.is_none() {
        body.push_str(
            "<div class=\"config-error\"><p>Configuration Error</p>\
             <p>WHOP_PRODUCT_ID is not configured. Unable to fetch users.</p></div>",
        );
    } else {
        body.push_str(&truncation_notice(ctx));
        let members = ctx.memberships();
        if members.is_empty() {
            body.push_str(
                "<div class=\"empty-state\"><p>No active users found for this product.</p></div>",
            );
        } else {
            body.push_str("<div class=\"member-list\">");
            for member in members {
                body.push_str(&member_card(member, PageKind::Dashboard));
            }
            body.push_str("</div>");
        }
    }
    body.push_str("</section>");

    body.push_str(&debug_panel(ctx, &format!("Company: {company_id}")));
    body.push_str("</main>");

    document("Admin Dashboard", &body)
}
