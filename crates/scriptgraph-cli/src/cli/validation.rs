use scriptgraph::{FetchMode, ResourceId};

/// Parse a requested id: `SCOPE/name` or `SCOPE/name:mode`.
///
/// Without a mode the resource's own fetch mode applies.
///
/// # Examples
///
/// Valid: `SHARED/jquery`, `PORTAL/nav:immediate`, `dojo/dom:on-load`
/// Invalid: `""`, `SHARED/`, `SHARED/app:later`
pub fn parse_request(s: &str) -> Result<(ResourceId, Option<FetchMode>), String> {
    if s.is_empty() {
        return Err("Resource id cannot be empty".to_string());
    }

    let (id, mode) = match s.rsplit_once(':') {
        Some((id, mode)) => (id, Some(mode.parse::<FetchMode>()?)),
        None => (s, None),
    };

    let id = id
        .parse::<ResourceId>()
        .map_err(|err| format!("Invalid resource id '{id}': {err}"))?;
    Ok((id, mode))
}
