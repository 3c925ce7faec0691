use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::ObjectiveErr;

/// The policy producing a starting parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitKind {
    /// Every parameter is zero.
    Zeros,
    /// The cached class weights followed by the functions' current parameters.
    Last,
    /// Class weights from the weighted class sizes and the functions' current parameters.
    Plugin,
}

impl FromStr for InitKind {
    type Err = ObjectiveErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zeros" => Ok(InitKind::Zeros),
            "last" => Ok(InitKind::Last),
            "plugin" => Ok(InitKind::Plugin),
            _ => Err(ObjectiveErr::UnknownInitPolicy(s.to_string())),
        }
    }
}

impl Display for InitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InitKind::Zeros => "zeros",
            InitKind::Last => "last",
            InitKind::Plugin => "plugin",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!("zeros".parse::<InitKind>().unwrap(), InitKind::Zeros);
        assert_eq!("PLUGIN".parse::<InitKind>().unwrap(), InitKind::Plugin);
        assert_eq!(InitKind::Last.to_string().parse::<InitKind>().unwrap(), InitKind::Last);
    }

    #[test]
    fn unknown_policy() {
        assert!(matches!(
            "random".parse::<InitKind>(),
            Err(ObjectiveErr::UnknownInitPolicy(name)) if name == "random"
        ));
    }
}
