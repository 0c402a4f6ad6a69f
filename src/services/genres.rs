/// Genres of `a` that also appear in `b`, in `a`'s order
///
/// Duplicates in `a` are kept and comparison is exact (no case folding), so the
/// result is not symmetric in order: `intersect(b, a)` has the same members but
/// follows `b`.
pub fn intersect(a: &[String], b: &[String]) -> Vec<String> {
    a.iter().filter(|genre| b.contains(genre)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn genres(names: &[&str]) -> Vec<String> {
        names.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_intersect_keeps_common_genres() {
        let a = genres(&["Action", "Drama"]);
        let b = genres(&["Drama", "Comedy"]);
        assert_eq!(intersect(&a, &b), genres(&["Drama"]));
    }

    #[test]
    fn test_intersect_follows_first_operand_order() {
        let a = genres(&["Action", "Drama", "Sci-Fi"]);
        let b = genres(&["Sci-Fi", "Action", "Romance"]);
        assert_eq!(intersect(&a, &b), genres(&["Action", "Sci-Fi"]));
        assert_eq!(intersect(&b, &a), genres(&["Sci-Fi", "Action"]));
    }

    #[test]
    fn test_intersect_matches_set_intersection() {
        let a = genres(&["Action", "Adventure", "Drama", "Fantasy", "Mystery"]);
        let b = genres(&["Drama", "Mystery", "Psychological", "Thriller", "Action"]);

        let result: HashSet<String> = intersect(&a, &b).into_iter().collect();
        let expected: HashSet<String> = a
            .iter()
            .cloned()
            .collect::<HashSet<_>>()
            .intersection(&b.iter().cloned().collect())
            .cloned()
            .collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_intersect_with_empty_first_operand() {
        assert!(intersect(&[], &genres(&["Action"])).is_empty());
        assert!(intersect(&genres(&["Action"]), &[]).is_empty());
    }

    #[test]
    fn test_intersect_preserves_duplicates() {
        let a = genres(&["Action", "Action"]);
        let b = genres(&["Action"]);
        assert_eq!(intersect(&a, &b), genres(&["Action", "Action"]));
    }

    #[test]
    fn test_intersect_is_case_sensitive() {
        let a = genres(&["Slice of Life"]);
        let b = genres(&["slice of life"]);
        assert!(intersect(&a, &b).is_empty());
    }
}
