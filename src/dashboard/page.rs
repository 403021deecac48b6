//! HTML rendering of a [`PageView`].
//!
//! Layout: sidebar on the left with the selection form, main panel on the
//! right. Every control submits the form on change so the page re-renders
//! from scratch, the same way the welcome → chart transition happens.

use std::fmt;

use crate::dashboard::chart::{Figure, PLOTLY_CDN};
use crate::dashboard::view::{PageBody, PageView, TokenRatio};
use crate::shared::fmt::{display, display_timestamp};

const TITLE: &str = "StepN";

const STYLE: &str = "\
body{margin:0;font-family:system-ui,-apple-system,sans-serif;display:flex;min-height:100vh;color:#262730}\
aside{width:18rem;padding:2rem 1.5rem;background:#f0f2f6}\
aside h1{margin-top:0}\
aside label.title{display:block;font-size:.9rem;margin:1.2rem 0 .4rem}\
aside .hint{margin-top:1rem;padding:.75rem;border-radius:.4rem;background:#d4edda;color:#155724}\
main{flex:1;padding:2rem 3rem}\
.error{padding:1rem;border-radius:.4rem;background:#f8d7da;color:#721c24}\
#chart{width:100%;height:32rem}";

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn render(view: &PageView) -> String {
    Page(view).to_string()
}

/// Full document for one render pass.
struct Page<'a>(&'a PageView);

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let figure = match &view.body {
            PageBody::Ratios(ratios) if !ratios.is_empty() => Some(Figure::from_ratios(
                ratios,
                &view.selection.currency.symbol,
            )),
            _ => None,
        };

        writeln!(f, "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">")?;
        writeln!(f, "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">")?;
        writeln!(f, "<title>{TITLE}</title>\n<style>{STYLE}</style>")?;
        if figure.is_some() {
            writeln!(f, "<script src=\"{PLOTLY_CDN}\"></script>")?;
        }
        writeln!(f, "</head>\n<body>")?;

        write!(f, "{}", Sidebar(view))?;

        writeln!(f, "<main>")?;
        match &view.body {
            PageBody::Welcome => f.write_str(WELCOME)?,
            PageBody::Failed(message) => {
                writeln!(f, "<div class=\"error\">{}</div>", escape_html(message))?
            }
            PageBody::Ratios(ratios) => {
                for ratio in ratios {
                    write!(f, "{}", Readout(ratio))?;
                }
            }
        }
        if let Some(figure) = figure {
            write_chart(f, &figure)?;
        }
        writeln!(f, "</main>\n</body>\n</html>")
    }
}

fn write_chart(f: &mut fmt::Formatter<'_>, figure: &Figure) -> fmt::Result {
    match figure.to_script_json() {
        Ok(json) => {
            writeln!(f, "<div id=\"chart\"></div>")?;
            writeln!(
                f,
                "<script>(function(){{var f={json};Plotly.newPlot('chart',f.data,f.layout,{{responsive:true}});}})();</script>"
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "chart serialization failed");
            writeln!(
                f,
                "<div class=\"error\">chart unavailable: {}</div>",
                escape_html(&e.to_string())
            )
        }
    }
}

/// Selection form: token checkboxes and the currency select.
struct Sidebar<'a>(&'a PageView);

impl fmt::Display for Sidebar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        writeln!(f, "<aside>\n<h1>{TITLE}</h1>\n<form method=\"get\" action=\"/\">")?;

        writeln!(f, "<label class=\"title\">Select token for tracking</label>")?;
        for token in &view.tokens {
            let symbol = escape_html(&token.symbol);
            let checked = if view.selection.is_token_selected(token) {
                " checked"
            } else {
                ""
            };
            writeln!(
                f,
                "<div><label><input type=\"checkbox\" name=\"token\" value=\"{symbol}\"{checked} onchange=\"this.form.submit()\"> {symbol}</label></div>"
            )?;
        }
        if view.selection.tokens.is_empty() {
            writeln!(f, "<div class=\"hint\">To continue select token 👆</div>")?;
        }

        writeln!(f, "<label class=\"title\" for=\"currency\">Select main currency</label>")?;
        writeln!(f, "<select id=\"currency\" name=\"currency\" onchange=\"this.form.submit()\">")?;
        for currency in &view.currencies {
            let symbol = escape_html(&currency.symbol);
            let selected = if currency.symbol == view.selection.currency.symbol {
                " selected"
            } else {
                ""
            };
            writeln!(f, "<option value=\"{symbol}\"{selected}>{symbol}</option>")?;
        }
        writeln!(f, "</select>")?;
        writeln!(f, "<noscript><p><button type=\"submit\">Apply</button></p></noscript>")?;
        writeln!(f, "</form>\n</aside>")
    }
}

const WELCOME: &str = "<h1>👋 Hello</h1>
<p>This application will help you compare StepN NFT tokens and more intelligently choose the time to sell and buy them. Interested?</p>
<p>👈 Follow the instructions in the side menu.</p>
";

/// "Current price" line for one token.
struct Readout<'a>(&'a TokenRatio);

impl fmt::Display for Readout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ratio = self.0;
        let token = escape_html(&ratio.token.symbol);
        let currency = escape_html(&ratio.currency.symbol.to_lowercase());
        match ratio.current() {
            Some(point) => writeln!(
                f,
                "<p>Current <strong>{token}</strong> price is {} <strong>{currency}</strong> at {}</p>",
                display(&point.ratio),
                display_timestamp(&point.timestamp),
            ),
            None => writeln!(
                f,
                "<p>No <strong>{token}</strong> prices in <strong>{currency}</strong> for the selected window</p>"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::view::Selection;
    use crate::domain::asset::{Asset, AssetRegistry};
    use crate::domain::price_history::PriceSample;
    use crate::domain::ratio::{align_and_divide, RatioSeries};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn view(selection: Selection, body: PageBody) -> PageView {
        let registry = AssetRegistry::default();
        PageView {
            tokens: registry.tokens().to_vec(),
            currencies: registry.currencies().to_vec(),
            selection,
            body,
        }
    }

    fn gst_in_sol() -> TokenRatio {
        let ts = |h| Utc.with_ymd_and_hms(2022, 5, 1, h, 0, 0).unwrap();
        let gst = vec![
            PriceSample::new(ts(1), Decimal::from(100)),
            PriceSample::new(ts(2), Decimal::from(110)),
        ];
        let sol = vec![
            PriceSample::new(ts(1), Decimal::from(10)),
            PriceSample::new(ts(2), Decimal::from(11)),
            PriceSample::new(ts(3), Decimal::from(12)),
        ];
        TokenRatio {
            token: Asset::new("GST", "green-satoshi-token"),
            currency: Asset::new("SOL", "solana"),
            series: align_and_divide(&gst, &sol).unwrap(),
        }
    }

    #[test]
    fn test_welcome_without_chart() {
        let registry = AssetRegistry::default();
        let html = render(&view(Selection::initial(&registry), PageBody::Welcome));

        assert!(html.contains("👋 Hello"));
        assert!(html.contains("Follow the instructions in the side menu"));
        assert!(html.contains("To continue select token"));
        assert!(!html.contains("id=\"chart\""));
        assert!(!html.contains(PLOTLY_CDN));
    }

    #[test]
    fn test_ratios_render_readout_and_chart() {
        let registry = AssetRegistry::default();
        let selection = Selection {
            tokens: vec![registry.token("GST").unwrap().clone()],
            currency: registry.currency("SOL").unwrap().clone(),
        };
        let html = render(&view(selection, PageBody::Ratios(vec![gst_in_sol()])));

        assert!(html.contains(
            "Current <strong>GST</strong> price is 9.17 <strong>sol</strong> at 2022-05-01 02:00:00"
        ));
        assert!(html.contains("id=\"chart\""));
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains("value=\"GST\" checked"));
        assert!(html.contains("<option value=\"SOL\" selected>"));
        assert!(!html.contains("To continue select token"));
        assert!(!html.contains("👋 Hello"));
    }

    #[test]
    fn test_empty_series_has_no_current_price() {
        let registry = AssetRegistry::default();
        let selection = Selection {
            tokens: vec![registry.token("GMT").unwrap().clone()],
            currency: registry.currency("USDT").unwrap().clone(),
        };
        let empty = TokenRatio {
            token: Asset::new("GMT", "stepn"),
            currency: Asset::new("USDT", "tether"),
            series: RatioSeries::default(),
        };
        let html = render(&view(selection, PageBody::Ratios(vec![empty])));
        assert!(html.contains("No <strong>GMT</strong> prices in <strong>usdt</strong>"));
    }

    #[test]
    fn test_failure_is_escaped_inline() {
        let registry = AssetRegistry::default();
        let html = render(&view(
            Selection::initial(&registry),
            PageBody::Failed("Server error 500: <html>oops</html>".into()),
        ));
        assert!(html.contains("<div class=\"error\">Server error 500: &lt;html&gt;oops&lt;/html&gt;</div>"));
        assert!(!html.contains("id=\"chart\""));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#39;");
    }
}
