//! URLs under which resources and groups are served.

use scriptgraph::{ResourceId, ResourceScope, ScriptGraph};
use scriptgraph_config::ServiceSettings;

/// Renders `/{portal}/{handler}/{version}/{SCOPE}/{name}[-{lang}][-min].js`.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    prefix: String,
}

impl UrlBuilder {
    pub fn new(settings: &ServiceSettings) -> Self {
        let portal = settings.portal_context.trim_end_matches('/');
        Self {
            prefix: format!("{portal}/{}/{}", settings.handler, settings.version),
        }
    }

    /// Base URL of SHARED resources, as used for require.js `baseUrl`.
    pub fn shared_base(&self) -> String {
        format!("{}/{}", self.prefix, ResourceScope::Shared)
    }

    pub fn render(&self, id: &ResourceId, lang: Option<&str>, minified: bool) -> String {
        let mut url = format!("{}/{}/{}", self.prefix, id.scope(), id.name());
        if let Some(lang) = lang {
            url.push('-');
            url.push_str(lang);
        }
        if minified {
            url.push_str("-min");
        }
        url.push_str(".js");
        url
    }
}

/// The locale served for a request in `locale`: the locale itself, or its
/// closest supported parent (`fr-CA` falls back to `fr`).
pub fn served_locale<'a>(locale: Option<&'a str>, supports: impl Fn(&str) -> bool) -> Option<&'a str> {
    let mut current = locale?;
    loop {
        if supports(current) {
            return Some(current);
        }
        let (parent, _) = current.rsplit_once(['-', '_'])?;
        current = parent;
    }
}

/// URL of a resource or load group, `None` if `id` is unknown.
///
/// A resource whose first module is remote is served from its own URI.
pub fn generate_url(
    graph: &ScriptGraph,
    urls: &UrlBuilder,
    id: &ResourceId,
    minified: bool,
    locale: Option<&str>,
) -> Option<String> {
    if id.scope() == ResourceScope::Group {
        let group = graph.load_group(id.name())?;
        let lang = served_locale(locale, |l| group.supports_locale(l));
        return Some(urls.render(id, lang, minified));
    }

    let resource = graph.resource(id)?;
    if let Some(uri) = resource.modules().first().and_then(|m| m.remote_uri()) {
        return Some(uri.to_string());
    }
    let lang = served_locale(locale, |l| resource.supports_locale(l));
    Some(urls.render(id, lang, minified))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_falls_back_to_parent_tag() {
        let supported = ["fr", "en-US"];
        let supports = |l: &str| supported.contains(&l);
        assert_eq!(served_locale(Some("fr-CA"), supports), Some("fr"));
        assert_eq!(served_locale(Some("en-US"), supports), Some("en-US"));
        assert_eq!(served_locale(Some("en"), supports), None);
        assert_eq!(served_locale(None, supports), None);
    }

    #[test]
    fn render_appends_lang_and_min() {
        let urls = UrlBuilder::new(&ServiceSettings {
            version: "1.0".into(),
            ..ServiceSettings::default()
        });
        let id = ResourceId::shared("jquery");
        assert_eq!(urls.render(&id, None, false), "/portal/scripts/1.0/SHARED/jquery.js");
        assert_eq!(urls.render(&id, Some("fr"), true), "/portal/scripts/1.0/SHARED/jquery-fr-min.js");
        assert_eq!(urls.shared_base(), "/portal/scripts/1.0/SHARED");
    }
}
