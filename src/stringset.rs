use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use crate::error::Error;

/// A set of strings.  Iteration (and so display) is in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StringSet(BTreeSet<String>);

impl StringSet {
    pub fn new() -> StringSet {
        StringSet(BTreeSet::new())
    }

    pub fn from_slice<S: AsRef<str>>(items: &[S]) -> StringSet {
        items.iter().map(|s| s.as_ref().to_string()).collect()
    }

    /// One element per character of `text`.
    pub fn from_chars(text: &str) -> StringSet {
        text.chars().map(String::from).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.0.contains(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// The only element of a one-element set.
    pub fn only(&self) -> Result<&str, Error> {
        let mut it = self.iter();
        match (it.next(), it.next()) {
            (Some(item), None) => Ok(item),
            (None, _) => Err(Error::bad_input("empty set")),
            (Some(_), Some(_)) => Err(Error::bad_input(format!("too many elements: {}", self))),
        }
    }

    pub fn union(&self, other: &StringSet) -> StringSet {
        StringSet(self.0.union(&other.0).cloned().collect())
    }

    pub fn intersect(&self, other: &StringSet) -> StringSet {
        StringSet(self.0.intersection(&other.0).cloned().collect())
    }

    pub fn minus(&self, other: &StringSet) -> StringSet {
        StringSet(self.0.difference(&other.0).cloned().collect())
    }

    pub fn union_all<'a, I>(sets: I) -> StringSet
    where
        I: IntoIterator<Item = &'a StringSet>,
    {
        sets.into_iter()
            .fold(StringSet::new(), |acc, s| acc.union(s))
    }

    /// Intersection of every set; empty if there are no sets at all.
    pub fn intersect_all<'a, I>(sets: I) -> StringSet
    where
        I: IntoIterator<Item = &'a StringSet>,
    {
        let mut it = sets.into_iter();
        match it.next() {
            None => StringSet::new(),
            Some(first) => it.fold(first.clone(), |acc, s| acc.intersect(s)),
        }
    }
}

impl FromIterator<String> for StringSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> StringSet {
        StringSet(iter.into_iter().collect())
    }
}

impl Display for StringSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(item)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_minus() {
        let u = StringSet::from_chars("dab").minus(&StringSet::from_chars("ab"));
        assert_eq!(u.len(), 1);
        assert_eq!(u.only().expect("one element"), "d");
    }

    #[test]
    fn test_intersect_pairwise() {
        let u = StringSet::from_chars("dab").intersect(&StringSet::from_chars("ab"));
        assert_eq!(u, StringSet::from_chars("ab"));
    }

    #[test]
    fn test_intersect_multiple() {
        let sets = [StringSet::from_chars("dab"), StringSet::from_chars("ab")];
        assert_eq!(StringSet::intersect_all(&sets), StringSet::from_chars("ab"));
    }

    #[test]
    fn test_only() {
        assert!(StringSet::new().only().is_err());
        assert!(StringSet::from_chars("ab").only().is_err());
        assert_eq!(StringSet::from_slice(&["cg"]).only().expect("one element"), "cg");
    }

    #[test]
    fn test_display() {
        assert_eq!(StringSet::from_chars("cab").to_string(), "{a, b, c}");
        assert_eq!(StringSet::new().to_string(), "{}");
    }

    fn letters() -> impl Strategy<Value = String> {
        "[a-g]{0,7}"
    }

    proptest! {
        #[test]
        fn union_contains_both(a in letters(), b in letters()) {
            let (sa, sb) = (StringSet::from_chars(&a), StringSet::from_chars(&b));
            let u = sa.union(&sb);
            prop_assert!(sa.iter().all(|x| u.contains(x)));
            prop_assert!(sb.iter().all(|x| u.contains(x)));
            prop_assert_eq!(u.len(), sa.len() + sb.len() - sa.intersect(&sb).len());
        }

        #[test]
        fn minus_and_intersect_partition(a in letters(), b in letters()) {
            let (sa, sb) = (StringSet::from_chars(&a), StringSet::from_chars(&b));
            let inside = sa.intersect(&sb);
            let outside = sa.minus(&sb);
            prop_assert!(inside.intersect(&outside).is_empty());
            prop_assert_eq!(inside.union(&outside), sa);
        }

        #[test]
        fn intersect_all_matches_pairwise(a in letters(), b in letters(), c in letters()) {
            let sets = [
                StringSet::from_chars(&a),
                StringSet::from_chars(&b),
                StringSet::from_chars(&c),
            ];
            let pairwise = sets[0].intersect(&sets[1]).intersect(&sets[2]);
            prop_assert_eq!(StringSet::intersect_all(&sets), pairwise);
        }
    }
}
