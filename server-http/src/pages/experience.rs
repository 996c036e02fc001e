use super::layout::{
    debug_panel, document, escape_html, greeting, member_card, truncation_notice, PageKind,
    PageContext,
};
use std::fmt::Write;

pub fn render(experience_id: &str, ctx: &PageContext<'_>) -> String {
    let mut body = String::new();

    let _ = write!(
        body,
        "<main class=\"experience\"><header>\
         <h1>Experience: <span>{}</span></h1><p>{}</p></header>",
        escape_html(experience_id),
        greeting(ctx, PageKind::Experience)
    );

    let _ = write!(
        body,
        "<section class=\"members\"><div class=\"section-header\">\
         <h2>Active App Users</h2><span>{} total</span></div>",
        ctx.member_count()
    );

    if ctx.product_id.is_none() {
        body.push_str(
            "<div class=\"config-warning\"><p>Set WHOP_PRODUCT_ID to view users.</p></div>",
        );
    } else {
        body.push_str(&truncation_notice(ctx));
        let members = ctx.memberships();
        if members.is_empty() {
            body.push_str("<div class=\"empty-state\"><p>No active users found.</p></div>");
        } else {
            body.push_str("<div class=\"member-grid\">");
            for member in members {
                body.push_str(&member_card(member, PageKind::Experience));
            }
            body.push_str("</div>");
        }
    }
    body.push_str("</section>");

    body.push_str(&debug_panel(ctx, &format!("Experience ID: {experience_id}")));
    body.push_str("</main>");

    document(&format!("Experience {experience_id}"), &body)
}
