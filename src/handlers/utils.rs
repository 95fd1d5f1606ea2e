/// Collect every `id` value from a query string such as `?id=2&id=3`.
/// Values stay strings; the repository decides whether they are valid ids.
pub fn ids_from_query(query: Option<&str>) -> Vec<String> {
    query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .filter(|(key, _)| key == "id")
                .map(|(_, value)| value.into_owned())
                .collect()
        })
        .unwrap_or_default()
}
