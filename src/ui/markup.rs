//! HTML emission for the sidebar render model.

use super::model::{HeaderModel, ProductRow, SidebarBody, SidebarModel, OVERLAY_Z_INDEX};

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the overlay (when open) followed by the panel.
pub fn render_html(model: &SidebarModel) -> String {
    let mut html = String::with_capacity(2048);

    if model.overlay_visible {
        html.push_str(&format!(
            "<div class=\"sidebar-overlay\" data-action=\"close\" style=\"z-index:{}\"></div>",
            OVERLAY_Z_INDEX
        ));
    }

    let open_class = if model.panel_open { " open" } else { "" };
    html.push_str(&format!(
        "<div class=\"recent-side-container{}\" style=\"z-index:{}\">",
        open_class, model.panel_z_index
    ));
    html.push_str("<div class=\"recent-inner\"><div class=\"recent-side-products-wrap\">");
    push_header(&mut html, &model.header);

    match &model.body {
        SidebarBody::Empty { icon, message } => {
            html.push_str("<div class=\"recent-side-products__empty\">");
            html.push_str(&format!("<div class=\"empty-icon\">{}</div>", escape_html(icon)));
            html.push_str(&format!("<p>{}</p>", escape_html(message)));
            html.push_str("</div>");
        }
        SidebarBody::Items(rows) => {
            html.push_str("<div class=\"recent-side-products__list\">");
            for row in rows {
                push_row(&mut html, row);
            }
            html.push_str("</div>");
        }
    }

    html.push_str("</div></div></div>");
    html
}

fn push_header(html: &mut String, header: &HeaderModel) {
    html.push_str("<div class=\"recent-side-product\">");
    html.push_str(&format!("<h2 class=\"title\">{}</h2>", escape_html(&header.title)));
    html.push_str(&format!(
        "<button class=\"close-btn\" data-action=\"close\">{}</button>",
        escape_html(&header.close_label)
    ));
    if let Some(summary) = &header.summary {
        html.push_str("<div class=\"header-info\">");
        html.push_str(&format!(
            "<span class=\"count\" data-count=\"{}\">{}</span>",
            summary.count,
            escape_html(&summary.count_label)
        ));
        html.push_str(&format!(
            "<button class=\"clear-btn\" data-action=\"clear-all\">{}</button>",
            escape_html(&summary.clear_label)
        ));
        html.push_str("</div>");
    }
    html.push_str("</div>");
}

fn push_row(html: &mut String, row: &ProductRow) {
    let key = escape_html(&row.key);
    match &row.link {
        Some(link) => html.push_str(&format!(
            "<div class=\"product-item\" data-key=\"{}\" data-link=\"{}\" style=\"cursor:pointer\">",
            key,
            escape_html(link)
        )),
        None => html.push_str(&format!("<div class=\"product-item\" data-key=\"{}\">", key)),
    }

    html.push_str(&format!(
        "<div class=\"product-meta\"><span class=\"viewed-time\">{}</span></div>",
        escape_html(&row.viewed_time)
    ));

    html.push_str("<div class=\"product_imgbox\">");
    match &row.image {
        Some(src) => html.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" />",
            escape_html(src),
            escape_html(&row.image_alt)
        )),
        None => html.push_str(&format!(
            "<div class=\"img-placeholder\" aria-label=\"{}\"></div>",
            escape_html(&row.image_alt)
        )),
    }
    html.push_str("</div>");

    html.push_str(&format!(
        "<div class=\"product_textbox\"><h3 class=\"product-name\">{}</h3></div>",
        escape_html(&row.name)
    ));
    html.push_str("<div class=\"product-actions\"></div>");
    html.push_str("</div>");
}
