/// Sorted, deduplicated list of subjects, used for autocomplete in the task form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectSet {
    subjects: Vec<String>,
}

impl SubjectSet {
    /// Replace the whole set
    pub fn rebuild<'a, I>(&mut self, subjects: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut subjects: Vec<String> = subjects.into_iter().map(str::to_string).collect();
        subjects.sort();
        subjects.dedup();
        self.subjects = subjects;
    }

    /// Insert keeping sort order. Returns false if already present.
    pub fn insert(&mut self, subject: &str) -> bool {
        match self.subjects.binary_search_by(|s| s.as_str().cmp(subject)) {
            Ok(_) => false,
            Err(pos) => {
                self.subjects.insert(pos, subject.to_string());
                true
            }
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.subjects
    }

    /// First subject extending `prefix` (case-insensitive)
    pub fn suggest(&self, prefix: &str) -> Option<&str> {
        if prefix.is_empty() {
            return None;
        }
        let needle = prefix.to_lowercase();
        self.subjects
            .iter()
            .find(|s| s.len() > prefix.len() && s.to_lowercase().starts_with(&needle))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(subjects: &[&str]) -> SubjectSet {
        let mut set = SubjectSet::default();
        set.rebuild(subjects.iter().copied());
        set
    }

    #[test]
    fn test_rebuild_sorts_and_dedups() {
        let set = set_of(&["Physics", "Math", "Physics", "Art"]);
        assert_eq!(set.as_slice(), ["Art", "Math", "Physics"]);
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut set = set_of(&["Art", "Physics"]);
        assert!(set.insert("Math"));
        assert!(!set.insert("Math"));
        assert!(set.insert("Zoology"));
        assert_eq!(set.as_slice(), ["Art", "Math", "Physics", "Zoology"]);
    }

    #[test]
    fn test_suggest() {
        let set = set_of(&["Chemistry", "Math", "Mathematics"]);
        assert_eq!(set.suggest("ma"), Some("Math"));
        assert_eq!(set.suggest("Math"), Some("Mathematics"));
        assert_eq!(set.suggest("chem"), Some("Chemistry"));
        assert_eq!(set.suggest("Mathematics"), None);
        assert_eq!(set.suggest(""), None);
        assert_eq!(set.suggest("Bio"), None);
    }
}
