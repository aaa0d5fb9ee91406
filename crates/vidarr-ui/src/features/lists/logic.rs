//! Pure helpers for list sharing and optimistic count patches.

use vidarr_api_models::CustomList;

/// Public share link for a list: `{origin}/share/list/{slug}`, preferring
/// the readable slug over the opaque share id. Private lists have no link.
#[must_use]
pub fn share_link(origin: &str, list: &CustomList) -> Option<String> {
    if !list.is_public {
        return None;
    }
    let token = list
        .share_slug
        .as_deref()
        .filter(|slug| !slug.is_empty())
        .unwrap_or(&list.share_id);
    Some(format!(
        "{}/share/list/{}",
        origin.trim_end_matches('/'),
        urlencoding::encode(token)
    ))
}

/// Optimistically bump a list's item count after an add. The lists endpoint
/// is revalidated in the background afterwards; this keeps the modal's
/// counts honest in the meantime.
#[must_use]
pub fn bump_item_count(lists: &[CustomList], id: i64) -> Vec<CustomList> {
    lists
        .iter()
        .cloned()
        .map(|mut list| {
            if list.id == id {
                list.item_count += 1;
            }
            list
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(id: i64, is_public: bool, slug: Option<&str>) -> CustomList {
        CustomList {
            id,
            name: "watchlist".to_string(),
            description: None,
            is_public,
            share_id: "a1b2c3".to_string(),
            share_slug: slug.map(str::to_string),
            cover_items: vec![],
            item_count: 2,
        }
    }

    #[test]
    fn slug_wins_over_share_id() {
        let with_slug = list(1, true, Some("best of 2026"));
        assert_eq!(
            share_link("https://portal.example", &with_slug).as_deref(),
            Some("https://portal.example/share/list/best%20of%202026")
        );
        let without_slug = list(1, true, None);
        assert_eq!(
            share_link("https://portal.example/", &without_slug).as_deref(),
            Some("https://portal.example/share/list/a1b2c3")
        );
    }

    #[test]
    fn private_lists_have_no_share_link() {
        assert_eq!(share_link("https://portal.example", &list(1, false, None)), None);
    }

    #[test]
    fn bump_patches_only_the_target_list() {
        let lists = vec![list(1, true, None), list(2, true, None)];
        let patched = bump_item_count(&lists, 2);
        assert_eq!(patched[0].item_count, 2);
        assert_eq!(patched[1].item_count, 3);
    }
}
