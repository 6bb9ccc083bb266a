//! Argument binding for task actions
//!
//! An action declares how many plain parameters it takes and whether it
//! captures the remaining values. The values a task was invoked with are
//! bound against that shape before each action runs.

/// A single argument value; `None` stands for a missing value
pub type ArgValue = Option<String>;

/// Declared parameter shape of an action (the task reference is implicit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Arity {
    /// Number of plain positional parameters
    pub params: usize,

    /// Whether a trailing rest parameter captures extra values
    pub rest: bool,
}

impl Arity {
    /// An action that only receives the task
    pub const NONE: Arity = Arity {
        params: 0,
        rest: false,
    };

    /// Fixed number of positional parameters
    pub fn fixed(params: usize) -> Self {
        Arity {
            params,
            rest: false,
        }
    }

    /// Positional parameters followed by a rest parameter
    pub fn with_rest(params: usize) -> Self {
        Arity { params, rest: true }
    }
}

/// Values bound to an action's parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundArgs {
    values: Vec<ArgValue>,
    rest: Option<Vec<ArgValue>>,
}

impl BoundArgs {
    /// Value of the positional parameter at `index`, if bound to something
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    /// All positional slots, including missing ones
    pub fn values(&self) -> &[ArgValue] {
        &self.values
    }

    /// Values captured by the rest parameter (empty without one)
    pub fn rest(&self) -> &[ArgValue] {
        self.rest.as_deref().unwrap_or(&[])
    }

    /// Whether the action declared a rest parameter
    pub fn has_rest(&self) -> bool {
        self.rest.is_some()
    }

    /// Number of positional slots
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.rest().is_empty()
    }
}

/// Bind supplied values against a declared arity
///
/// Missing positional values bind to `None`, extra values are dropped
/// unless a rest parameter collects them.
pub fn bind(arity: Arity, supplied: &[ArgValue]) -> BoundArgs {
    let values = (0..arity.params)
        .map(|i| supplied.get(i).cloned().flatten())
        .collect();

    let rest = arity
        .rest
        .then(|| supplied.iter().skip(arity.params).cloned().collect());

    BoundArgs { values, rest }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<ArgValue> {
        items.iter().map(|s| Some(s.to_string())).collect()
    }

    #[test]
    fn test_extra_values_are_dropped() {
        let bound = bind(Arity::fixed(1), &values(&["1", "2", "3"]));
        assert_eq!(bound.len(), 1);
        assert_eq!(bound.get(0), Some("1"));
        assert!(bound.rest().is_empty());
    }

    #[test]
    fn test_missing_values_are_none() {
        let bound = bind(Arity::fixed(3), &values(&["1", "2"]));
        assert_eq!(bound.get(0), Some("1"));
        assert_eq!(bound.get(1), Some("2"));
        assert_eq!(bound.get(2), None);
        assert_eq!(bound.values()[2], None);
    }

    #[test]
    fn test_rest_captures_remaining() {
        let bound = bind(Arity::with_rest(1), &values(&["1", "2", "3"]));
        assert_eq!(bound.get(0), Some("1"));
        assert_eq!(bound.rest(), &values(&["2", "3"])[..]);
    }

    #[test]
    fn test_rest_is_empty_when_nothing_remains() {
        let bound = bind(Arity::with_rest(2), &values(&["1"]));
        assert!(bound.has_rest());
        assert_eq!(bound.get(1), None);
        assert!(bound.rest().is_empty());
    }

    #[test]
    fn test_no_parameters() {
        let bound = bind(Arity::NONE, &values(&["1", "2"]));
        assert!(bound.is_empty());
        assert!(!bound.has_rest());
    }

    #[test]
    fn test_missing_value_inside_supplied_list() {
        let supplied = vec![None, Some("1.2".to_string())];
        let bound = bind(Arity::fixed(2), &supplied);
        assert_eq!(bound.get(0), None);
        assert_eq!(bound.get(1), Some("1.2"));
    }
}
