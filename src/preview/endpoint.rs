const CHANGE_SUFFIX: &str = "/change/";
const ADD_SUFFIX: &str = "/add/";
const PREVIEW_SEGMENT: &str = "preview/";

/// Maps an admin page path to the preview endpoint.
///
/// - `.../<object>/change/` becomes `.../<object>/preview/`
/// - `.../add/` becomes `.../preview/`
/// - anything else gets `preview/` appended after a single `/`
pub fn preview_path(page_path: &str) -> String {
    if let Some(base) = page_path
        .strip_suffix(CHANGE_SUFFIX)
        .or_else(|| page_path.strip_suffix(ADD_SUFFIX))
    {
        return format!("{base}/{PREVIEW_SEGMENT}");
    }
    let mut path = page_path.to_string();
    if !path.ends_with('/') {
        path.push('/');
    }
    path.push_str(PREVIEW_SEGMENT);
    path
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn change_page_maps_to_object_preview() {
        assert_eq!(
            preview_path("/admin/app/model/3/change/"),
            "/admin/app/model/3/preview/"
        );
    }

    #[test]
    fn add_page_maps_to_preview() {
        assert_eq!(
            preview_path("/admin/app/model/add/"),
            "/admin/app/model/preview/"
        );
    }

    #[test]
    fn other_page_appends_preview() {
        assert_eq!(
            preview_path("/admin/app/model/3/"),
            "/admin/app/model/3/preview/"
        );
    }

    #[test]
    fn missing_trailing_slash_is_added() {
        assert_eq!(
            preview_path("/admin/app/model/3"),
            "/admin/app/model/3/preview/"
        );
    }

    #[test]
    fn change_and_add_only_match_whole_segments() {
        assert_eq!(
            preview_path("/admin/app/model/3/exchange/"),
            "/admin/app/model/3/exchange/preview/"
        );
        assert_eq!(preview_path("/admin/app/pad/"), "/admin/app/pad/preview/");
    }

    #[test]
    fn root_level_suffixes() {
        assert_eq!(preview_path("/change/"), "/preview/");
        assert_eq!(preview_path("/add/"), "/preview/");
        assert_eq!(preview_path(""), "/preview/");
    }

    #[quickcheck]
    fn result_always_ends_with_preview_segment(segments: Vec<String>) -> bool {
        let path: String = segments
            .iter()
            .map(|s| s.replace('/', ""))
            .filter(|s| !s.is_empty())
            .map(|s| format!("/{s}"))
            .collect();
        let derived = preview_path(&path);
        derived.ends_with("/preview/") && !derived.contains("//")
    }
}
