use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

use super::query::QueryParams;

/// Characters escaped inside a single path segment. Unreserved characters and most
/// sub-delimiters pass through.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    #[error("path template {template:?} has no value for {{{name}}}")]
    MissingPathParam { template: String, name: String },

    #[error("path template {template:?} is malformed")]
    MalformedTemplate { template: String },

    /// Empty, `.` and `..` values would change which endpoint the URL points to.
    #[error("value {value:?} for {{{name}}} in {template:?} is not a usable path segment")]
    InvalidPathSegment {
        template: String,
        name: String,
        value: String,
    },

    #[error("invalid URL {url:?}: {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("query parameters must serialize to a flat object: {0}")]
    Query(String),
}

/// Substitute `{name}` slots in `template` with percent-encoded values.
pub fn render_path(template: &str, params: &[(&str, String)]) -> Result<String, UrlError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find(['{', '}']) {
        if rest[open..].starts_with('}') {
            return Err(UrlError::MalformedTemplate {
                template: template.to_owned(),
            });
        }
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| UrlError::MalformedTemplate {
            template: template.to_owned(),
        })?;
        let name = &after[..close];
        if name.is_empty() || name.contains('{') {
            return Err(UrlError::MalformedTemplate {
                template: template.to_owned(),
            });
        }
        let value = params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| UrlError::MissingPathParam {
                template: template.to_owned(),
                name: name.to_owned(),
            })?;
        if matches!(value.as_str(), "" | "." | "..") {
            return Err(UrlError::InvalidPathSegment {
                template: template.to_owned(),
                name: name.to_owned(),
                value: value.clone(),
            });
        }
        out.extend(utf8_percent_encode(value, PATH_SEGMENT));
        rest = &after[close + 1..];
    }
    out.push_str(rest);

    Ok(out)
}

/// Join `base` and `path` with exactly one `/` and attach the encoded query.
pub fn build_url(base: &Url, path: &str, query: &QueryParams) -> Result<Url, UrlError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    let mut url = Url::parse(&joined).map_err(|source| UrlError::Parse {
        url: joined.clone(),
        source,
    })?;

    let encoded = query.encode();
    if !encoded.is_empty() {
        url.set_query(Some(&encoded));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_and_escapes_slots() {
        let path = render_path(
            "whatsapp/2/senders/{sender}/templates/{templateName}",
            &[
                ("sender", "385 99/1?#".to_owned()),
                ("templateName", "welcome_v2".to_owned()),
            ],
        )
        .unwrap();
        assert_eq!(
            path,
            "whatsapp/2/senders/385%2099%2F1%3F%23/templates/welcome_v2"
        );
    }

    #[test]
    fn render_escapes_percent_and_braces() {
        let path = render_path("x/{id}", &[("id", "50%{a}".to_owned())]).unwrap();
        assert_eq!(path, "x/50%25%7Ba%7D");
    }

    #[test]
    fn render_rejects_missing_and_malformed_slots() {
        assert!(matches!(
            render_path("apps/{appId}", &[]),
            Err(UrlError::MissingPathParam { name, .. }) if name == "appId"
        ));
        assert!(matches!(
            render_path("apps/{appId", &[("appId", "1".to_owned())]),
            Err(UrlError::MalformedTemplate { .. })
        ));
        assert!(matches!(
            render_path("apps/appId}", &[]),
            Err(UrlError::MalformedTemplate { .. })
        ));
        assert!(matches!(
            render_path("apps/{}", &[]),
            Err(UrlError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn render_rejects_dot_and_empty_segments() {
        for value in ["", ".", ".."] {
            assert!(
                matches!(
                    render_path("numbers/1/numbers/{numberKey}", &[("numberKey", value.to_owned())]),
                    Err(UrlError::InvalidPathSegment { ref name, .. }) if name == "numberKey"
                ),
                "accepted {value:?}"
            );
        }

        let path = render_path("x/{id}", &[("id", "...".to_owned())]).unwrap();
        assert_eq!(path, "x/...");
        let path = render_path("x/{id}", &[("id", "%2e%2e".to_owned())]).unwrap();
        assert_eq!(path, "x/%252e%252e");
    }

    #[test]
    fn build_url_uses_a_single_separator() {
        let query = QueryParams::new();
        for base in ["https://api.test", "https://api.test/"] {
            let base = Url::parse(base).unwrap();
            for path in ["sms/1/reports", "/sms/1/reports"] {
                let url = build_url(&base, path, &query).unwrap();
                assert_eq!(url.as_str(), "https://api.test/sms/1/reports");
            }
        }

        let prefixed = Url::parse("https://api.test/proxy/").unwrap();
        let url = build_url(&prefixed, "/sms/1/reports", &query).unwrap();
        assert_eq!(url.as_str(), "https://api.test/proxy/sms/1/reports");
    }

    #[test]
    fn build_url_appends_query_only_when_present() {
        let base = Url::parse("https://api.test").unwrap();
        let mut query = QueryParams::new();
        query.insert("limit", "10");
        query.insert("bulkId", "a b");
        let url = build_url(&base, "sms/1/reports", &query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.test/sms/1/reports?bulkId=a+b&limit=10"
        );
    }
}
