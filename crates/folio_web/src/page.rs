//! Server-rendered HTML for the articles listing.

use folio_core::html::escape_html;
use folio_core::listing::{self, ListingQuery};
use folio_core::{ArticleListing, ArticleRef};
use folio_views::{NavItem, NavLink, PaginationNav};
use std::fmt::Write;

pub const EMPTY_STATE: &str = "No investment insights published yet.";

pub fn articles_page(query: &ListingQuery, listing: &ArticleListing) -> String {
    let mut html = String::from("<!doctype html><html><head><meta charset=\"utf-8\"><title>Articles</title></head><body><main class=\"articles\">");
    html.push_str(&search_form(query));
    html.push_str(&category_tabs(query));

    if listing.items.is_empty() {
        let _ = write!(html, "<div class=\"empty\"><p>{}</p></div>", EMPTY_STATE);
    } else {
        for article in &listing.items {
            html.push_str(&article_card(article));
        }
    }

    if let Some(nav) = PaginationNav::build(query.page, listing.total_pages, |page| query.page_href(page)) {
        html.push_str(&pagination(&nav));
    }

    html.push_str("</main></body></html>");
    html
}

fn search_form(query: &ListingQuery) -> String {
    format!(
        "<form class=\"search\" action=\"{}\" method=\"get\"><label for=\"article-search\">Search articles</label>\
         <input id=\"article-search\" name=\"q\" value=\"{}\" placeholder=\"Search articles by title, slug, or excerpt...\"></form>",
        listing::ARTICLES_PATH,
        escape_html(&query.q)
    )
}

fn category_tabs(query: &ListingQuery) -> String {
    let mut html = String::from("<nav class=\"categories\">");
    for tab in listing::tabs() {
        let class = if query.is_active(&tab) { "tab active" } else { "tab" };
        let _ = write!(
            html,
            "<a class=\"{}\" href=\"{}\">{}</a>",
            class,
            escape_html(&query.tab_href(&tab)),
            escape_html(tab.label())
        );
    }
    html.push_str("</nav>");
    html
}

fn article_card(article: &ArticleRef) -> String {
    let mut html = String::from("<article class=\"card\">");
    let _ = write!(
        html,
        "<h2><a href=\"/articles/{}\">{}</a></h2>",
        escape_html(&article.slug),
        escape_html(&article.title)
    );
    let _ = write!(
        html,
        "<p class=\"meta\"><time datetime=\"{}\">{}</time>",
        article.published_at.to_rfc3339(),
        article.published_at.format("%b %-d, %Y")
    );
    if !article.category.is_empty() {
        let _ = write!(html, " <span class=\"category\">{}</span>", escape_html(&article.category));
    }
    if article.is_trending {
        html.push_str(" <span class=\"trending\">Trending</span>");
    }
    html.push_str("</p>");
    if !article.excerpt.is_empty() {
        let _ = write!(html, "<p class=\"excerpt\">{}</p>", escape_html(&article.excerpt));
    }
    html.push_str("</article>");
    html
}

fn nav_link(link: &NavLink, label: &str, rel: &str) -> String {
    if link.disabled {
        format!("<a class=\"page disabled\" aria-disabled=\"true\" tabindex=\"-1\" href=\"{}\">{}</a>", escape_html(&link.href), label)
    } else {
        format!("<a class=\"page\" rel=\"{}\" href=\"{}\">{}</a>", rel, escape_html(&link.href), label)
    }
}

fn pagination(nav: &PaginationNav) -> String {
    let mut html = String::from("<nav aria-label=\"Pagination\" class=\"pagination\">");
    html.push_str(&nav_link(&nav.previous, "Previous", "prev"));
    for item in &nav.items {
        match item {
            NavItem::Page { number, href, active: true } => {
                let _ = write!(html, "<a class=\"page active\" aria-current=\"page\" href=\"{}\">{}</a>", escape_html(href), number);
            }
            NavItem::Page { number, href, .. } => {
                let _ = write!(html, "<a class=\"page\" href=\"{}\">{}</a>", escape_html(href), number);
            }
            NavItem::Ellipsis => html.push_str("<span class=\"ellipsis\">···</span>"),
        }
    }
    html.push_str(&nav_link(&nav.next, "Next", "next"));
    html.push_str("</nav>");
    html
}
