use core::fmt;

use ecow::EcoString;
use smallvec::SmallVec;

use super::ValueType;

/// Parameter list storage; most methods take a handful of arguments.
pub type Params = SmallVec<[ValueType; 4]>;

/// Name plus ordered parameter types.
///
/// Two methods with the same signature are the same slot of a proxy class,
/// no matter which type declared them or what they return.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    name: EcoString,
    params: Params,
}

impl MethodSignature {
    pub fn new(name: impl Into<EcoString>, params: impl IntoIterator<Item = ValueType>) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn test_structural_equality() {
        let a = MethodSignature::new("foo", [ValueType::Int, ValueType::string()]);
        let b = MethodSignature::new("foo", [ValueType::Int, ValueType::string()]);
        assert_eq!(a, b);

        let mut seen = HashSet::new();
        assert!(seen.insert(a));
        assert!(!seen.insert(b));
    }

    #[test]
    fn test_parameter_order_matters() {
        let a = MethodSignature::new("foo", [ValueType::Int, ValueType::Long]);
        let b = MethodSignature::new("foo", [ValueType::Long, ValueType::Int]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        let sig = MethodSignature::new("compareTo", [ValueType::object()]);
        assert_eq!(sig.to_string(), "compareTo(java.lang.Object)");
        assert_eq!(MethodSignature::new("run", []).to_string(), "run()");
    }
}
