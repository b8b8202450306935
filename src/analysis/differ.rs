use crate::extractor::UsernameSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferenceResult {
    /// Accounts you follow that are missing from your followers.
    pub not_following_back: Vec<String>,
    /// Followers you are not following.
    pub dont_follow_back: Vec<String>,
    pub mutual_count: usize,
}

impl DifferenceResult {
    pub fn not_following_back_count(&self) -> usize {
        self.not_following_back.len()
    }

    pub fn dont_follow_back_count(&self) -> usize {
        self.dont_follow_back.len()
    }

    pub fn category_counts(&self) -> CategoryCounts {
        CategoryCounts {
            mutual: self.mutual_count,
            not_following_back: self.not_following_back_count(),
            dont_follow_back: self.dont_follow_back_count(),
        }
    }
}

/// Three-way tally used for the summary chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub mutual: usize,
    pub not_following_back: usize,
    pub dont_follow_back: usize,
}

impl CategoryCounts {
    pub fn categories(&self) -> [(&'static str, usize); 3] {
        [
            ("Mutual", self.mutual),
            ("Not following back", self.not_following_back),
            ("You don't follow back", self.dont_follow_back),
        ]
    }

    pub fn largest(&self) -> usize {
        self.mutual
            .max(self.not_following_back)
            .max(self.dont_follow_back)
    }
}

/// Both lists come out in ascending byte-wise order since `UsernameSet`
/// iterates sorted.
pub fn compute_difference(followers: &UsernameSet, following: &UsernameSet) -> DifferenceResult {
    let followers = followers.as_btree();
    let following = following.as_btree();

    DifferenceResult {
        not_following_back: following.difference(followers).cloned().collect(),
        dont_follow_back: followers.difference(following).cloned().collect(),
        mutual_count: followers.intersection(following).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> UsernameSet {
        names.iter().copied().collect()
    }

    #[test]
    fn test_partial_overlap() {
        let result = compute_difference(&set(&["alice", "bob"]), &set(&["bob", "carol"]));
        assert_eq!(result.not_following_back, vec!["carol"]);
        assert_eq!(result.dont_follow_back, vec!["alice"]);
        assert_eq!(result.mutual_count, 1);
    }

    #[test]
    fn test_identical_sets() {
        let result = compute_difference(&set(&["a", "b"]), &set(&["a", "b"]));
        assert!(result.not_following_back.is_empty());
        assert!(result.dont_follow_back.is_empty());
        assert_eq!(result.mutual_count, 2);
    }

    #[test]
    fn test_empty_inputs() {
        let result = compute_difference(&UsernameSet::default(), &UsernameSet::default());
        assert_eq!(result, DifferenceResult::default());

        let result = compute_difference(&UsernameSet::default(), &set(&["x"]));
        assert_eq!(result.not_following_back, vec!["x"]);
        assert_eq!(result.mutual_count, 0);
    }

    #[test]
    fn test_count_identities_and_disjointness() {
        let followers = set(&["ann", "ben", "cat", "dan", "eve"]);
        let following = set(&["cat", "dan", "fay", "gus"]);
        let result = compute_difference(&followers, &following);

        assert!(result.not_following_back.iter().all(|u| !followers.contains(u)));
        assert!(result.dont_follow_back.iter().all(|u| !following.contains(u)));
        assert_eq!(result.mutual_count + result.not_following_back_count(), following.len());
        assert_eq!(result.mutual_count + result.dont_follow_back_count(), followers.len());
    }

    #[test]
    fn test_output_is_sorted_bytewise() {
        let following = set(&["zoe", "Zed", "_under", "amy", "Amy", "9lives"]);
        let result = compute_difference(&UsernameSet::default(), &following);
        assert_eq!(
            result.not_following_back,
            vec!["9lives", "Amy", "Zed", "_under", "amy", "zoe"]
        );
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let result = compute_difference(&set(&["Bob"]), &set(&["bob"]));
        assert_eq!(result.not_following_back, vec!["bob"]);
        assert_eq!(result.dont_follow_back, vec!["Bob"]);
        assert_eq!(result.mutual_count, 0);
    }

    #[test]
    fn test_category_counts() {
        let result = compute_difference(&set(&["a", "b", "c"]), &set(&["c", "d"]));
        let counts = result.category_counts();
        assert_eq!(counts.mutual, 1);
        assert_eq!(counts.not_following_back, 1);
        assert_eq!(counts.dont_follow_back, 2);
        assert_eq!(counts.largest(), 2);
        assert_eq!(counts.categories()[2], ("You don't follow back", 2));
    }
}
