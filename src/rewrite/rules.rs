//! The standard rule catalogue for exported website-builder pages.
//!
//! Order matters only where one rule's anchor could be produced or consumed by
//! another. The catalogue is laid out as deletions, then substitutions and
//! comment-outs, then structural removal, then injections, with one exception:
//! the Google Fonts injection sits next to the font deletion because its
//! anchor is itself a vendor stylesheet.

use super::{Injection, Position, Rule, RuleSet};
use crate::{
    config::MenuMode,
    embed::{MOBILE_MENU_CSS, MOBILE_MENU_JS},
};
use regex::Regex;

/// Pinned jQuery replacing the vendor-hosted copy.
pub const JQUERY_PINNED: &str = r#"<script src="https://code.jquery.com/jquery-3.7.1.min.js"></script>"#;

/// Left in place of the removed Store navigation item.
pub const STORE_REMOVED_COMMENT: &str = "<!-- Store menu item removed -->";

/// Presence of this host means web fonts are already wired up.
pub const GOOGLE_FONTS_MARKER: &str = "fonts.googleapis.com";

const GOOGLE_FONTS: &str = "\t<!-- Google Fonts - replacing Weebly fonts -->\n\t<link href=\"https://fonts.googleapis.com/css2?family=Raleway:wght@300;400;500;600;700&family=Lora:wght@400;700&family=Dosis:wght@400;500;600;700&display=swap\" rel=\"stylesheet\">\n\t\n";

/// Store entry in the inline navigation JSON.
const STORE_NAV_ENTRY: &str =
    r#"\{"id":"129236209278723622","title":"Store","url":"store\.html"[^}]*\}"#;

const STORE_LI_OPEN: &str = r#"<li id="pg129236209278723622"[^>]*>"#;

/// Element body up to and including the first `</li>`; cannot cross it.
const UP_TO_LI_CLOSE: &str = r"(?:[^<]|<[^/<]|</[^l<]|</l[^i<]|</li[^><])*</li>";

const INLINE_MENU_MARKER: &str = "Mobile menu toggle";

const INLINE_MENU_SCRIPT: &str = "
<script>
// Mobile menu toggle functionality
document.addEventListener('DOMContentLoaded', function() {
\tvar hamburger = document.querySelector('.nav-trigger');
\tvar mobileNav = document.querySelector('.navmobile-wrapper');
\t
\tif (hamburger && mobileNav) {
\t\thamburger.addEventListener('click', function() {
\t\t\tmobileNav.classList.toggle('open');
\t\t});
\t}
\t
\t// Initialize flyouts if the function exists
\tif (typeof initFlyouts === 'function') {
\t\tinitFlyouts();
\t}
});
</script>

";

const MENU_STUB: &str = "
\t// Minimal menu functionality stub (if needed by main_style.css)
\tfunction initPublishedFlyoutMenus(items, currentId, prefix, activeClass, isPreview, templates) {
\t\t// Basic implementation - can be expanded if needed
\t\tconsole.log('Menu initialized with', items.length, 'items');
\t}
";

/// Compile a hardcoded pattern.
fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hardcoded rewrite pattern is valid")
}

/// Vendor stylesheet `<link>` by path under the vendor CDN.
fn vendor_link(path: &str) -> Regex {
    re(&format!(
        r"<link[^>]*cdn2\.editmysite\.com/{}[^>]*>\s*",
        regex::escape(path)
    ))
}

/// Vendor `<script src>` by path under the vendor CDN.
fn vendor_script(path: &str) -> Regex {
    re(&format!(
        r"<script[^>]*cdn2\.editmysite\.com/{}[^>]*></script>\s*",
        regex::escape(path)
    ))
}

/// Inline `<script>` block whose body starts with `body_start`.
///
/// Non-greedy up to the first `</script>` so braces and `<` inside the block
/// never pull in the neighbouring markup.
fn inline_block(open_tag: &str, body_start: &str) -> Regex {
    re(&format!(
        r"(?s){}\s*{}.*?</script>\s*",
        regex::escape(open_tag),
        body_start
    ))
}

impl RuleSet {
    /// The full cleanup catalogue.
    ///
    /// `companion_dir` is the document-relative directory holding the
    /// mobile menu companions; it is only referenced in companion mode.
    pub fn standard(menu: MenuMode, companion_dir: &str) -> Self {
        let mut rules = web_fonts();
        rules.extend(deletions());
        rules.extend(modernize());
        rules.push(store_menu_item());
        rules.extend(injections(menu, companion_dir));
        Self::new(rules)
    }
}

/// Vendor font links out, Google Fonts in.
///
/// The injection anchor is the vendor base stylesheet, which the stylesheet
/// deletions remove, so this pair runs before them.
fn web_fonts() -> Vec<Rule> {
    vec![
        Rule::delete("vendor-fonts", re(r"<link[^>]*cdn2\.editmysite\.com/fonts[^>]*>\s*")),
        Rule::inject(
            "google-fonts",
            Injection {
                content: GOOGLE_FONTS.to_owned(),
                marker: GOOGLE_FONTS_MARKER.to_owned(),
                anchor: r#"<link id="wsite-base-style""#,
                position: Position::Before,
                requires: None,
            },
        ),
    ]
}

fn deletions() -> Vec<Rule> {
    const JS: &str = r#"<script type="text/javascript">"#;
    vec![
        Rule::delete("vendor-sites-css", vendor_link("css/sites.css")),
        Rule::delete("vendor-fancybox-css", vendor_link("css/old/fancybox.css")),
        Rule::delete("vendor-social-icons-css", vendor_link("css/social-icons.css")),
        Rule::delete(
            "vendor-slideshow-css",
            vendor_link("css/old/slideshow/slideshow.css"),
        ),
        Rule::delete("vendor-stl-js", vendor_script("js/lang/en/stl.js")),
        Rule::delete("vendor-main-js", vendor_script("js/site/main.js")),
        Rule::delete("vendor-slideshow-js", vendor_script("js/old/slideshow-jq.js")),
        Rule::delete(
            "vendor-customer-accounts-js",
            vendor_script("js/site/main-customer-accounts-site.js"),
        ),
        Rule::delete(
            "template-artifacts-js",
            re(r#"<script src=['"]files/templateArtifacts\.js[^>]*></script>\s*"#),
        ),
        Rule::delete("inline-static-base", inline_block("<script>", r"var STATIC_BASE")),
        Rule::delete(
            "inline-customer-accounts",
            inline_block(JS, r"function initCustomerAccountsModels\(\)"),
        ),
        Rule::delete("inline-w-init", inline_block(JS, r"_W = _W")),
        Rule::delete("inline-w-config-domain", inline_block(JS, r"_W\.configDomain")),
        Rule::delete("inline-w-relinquish", inline_block("<script>", r"_W\.relinquish")),
        Rule::delete("inline-w-theme-plugins", inline_block("<script>", r"_W\.themePlugins")),
        Rule::delete("inline-w-recaptcha", inline_block(JS, r"_W\.recaptchaUrl")),
        Rule::delete(
            "customer-accounts-app",
            re(r#"<div id="customer-accounts-app"></div>\s*"#),
        ),
        Rule::delete(
            "store-nav-entry",
            re(&format!(",{STORE_NAV_ENTRY}|{STORE_NAV_ENTRY},?")),
        ),
    ]
}

fn modernize() -> Vec<Rule> {
    vec![
        Rule::substitute(
            "jquery-pinned",
            re(r#"<script src=['"]https?://cdn2\.editmysite\.com/js/jquery[^>]*></script>"#),
            JQUERY_PINNED,
        ),
        Rule::comment_out(
            "theme-plugins-js",
            r#"<script language="javascript" src="files/theme/plugins.js"></script>"#,
        ),
        Rule::comment_out(
            "theme-custom-js",
            r#"<script language="javascript" src="files/theme/custom.js"></script>"#,
        ),
        Rule::comment_out(
            "theme-mobile-js",
            r#"<script language="javascript" src="files/theme/mobile.js"></script>"#,
        ),
    ]
}

/// The Store `<li>`, either fenced by comments or bare.
///
/// The fenced form only accepts a comment right after the Store item's own
/// `</li>`, so a following sibling item is never swallowed.
fn store_menu_item() -> Rule {
    Rule::structural(
        "store-menu-item",
        vec![
            re(&format!(
                r"<!--[^>]*-->\s*{STORE_LI_OPEN}{UP_TO_LI_CLOSE}\s*<!--[^>]*-->"
            )),
            re(&format!(r"(?s){STORE_LI_OPEN}.*?</li>")),
        ],
        STORE_REMOVED_COMMENT,
    )
}

/// Document-relative reference to a companion file.
fn companion_href(dir: &str, name: &str) -> String {
    let dir = dir.trim_matches('/');
    if dir.is_empty() {
        name.to_owned()
    } else {
        format!("{dir}/{name}")
    }
}

fn injections(menu: MenuMode, companion_dir: &str) -> Vec<Rule> {
    let mut rules = Vec::new();

    match menu {
        MenuMode::Companion => {
            let css = companion_href(companion_dir, MOBILE_MENU_CSS.name);
            let js = companion_href(companion_dir, MOBILE_MENU_JS.name);
            rules.push(Rule::inject(
                "mobile-menu-css",
                Injection {
                    content: format!("\t<link rel=\"stylesheet\" href=\"{css}\">\n"),
                    marker: css,
                    anchor: "</head>",
                    position: Position::Before,
                    requires: None,
                },
            ));
            rules.push(Rule::inject(
                "mobile-menu-js",
                Injection {
                    content: format!("<script src=\"{js}\"></script>\n"),
                    marker: js,
                    anchor: "</body>",
                    position: Position::Before,
                    requires: None,
                },
            ));
        }
        MenuMode::Inline => rules.push(Rule::inject(
            "mobile-menu-inline",
            Injection {
                content: INLINE_MENU_SCRIPT.to_owned(),
                marker: INLINE_MENU_MARKER.to_owned(),
                anchor: "</body>",
                position: Position::Before,
                requires: Some("function initFlyouts"),
            },
        )),
        MenuMode::Off => {}
    }

    rules.push(Rule::inject(
        "flyout-menu-stub",
        Injection {
            content: MENU_STUB.to_owned(),
            marker: "function initPublishedFlyoutMenus".to_owned(),
            anchor: "function initFlyouts(){",
            position: Position::After,
            requires: Some("initFlyouts()"),
        },
    ));

    rules
}
