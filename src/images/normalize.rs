//! Provider URL normalization.
//!
//! Icon-library documentation pages are rewritten to the raw-asset CDN URL
//! for the same icon name, so a `@preview` tag can point at the page a human
//! would browse. Unrecognized URLs pass through unchanged.

/// (page marker, raw asset template) pairs. The marker is searched as a
/// substring so both http and https page links match.
const PROVIDERS: &[(&str, &str)] = &[
    (
        "lucide.dev/icons/",
        "https://unpkg.com/lucide-static@latest/icons/{name}.svg",
    ),
    (
        "phosphoricons.com/icons/",
        "https://unpkg.com/@phosphor-icons/core@latest/assets/regular/{name}.svg",
    ),
];

pub fn normalize_provider_url(url: &str) -> String {
    for (marker, template) in PROVIDERS {
        if let Some(index) = url.find(marker) {
            let tail = &url[index + marker.len()..];
            let name = tail
                .split(|c| c == '?' || c == '#')
                .next()
                .unwrap_or(tail)
                .trim_matches('/');
            if !name.is_empty() && !name.contains('/') {
                return template.replace("{name}", &name.to_ascii_lowercase());
            }
        }
    }
    url.to_string()
}
