//! Code page name to printer table id mapping.
//!
//! The `ESC GS t n` command selects a character table by a numeric id that
//! differs between printer families. A [`CodepageMapping`] is either a named
//! profile or an explicit map supplied by the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Codepage;

/// Built-in mapping profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingProfile {
    /// Star Micronics Line mode table ids.
    #[default]
    Star,
}

impl MappingProfile {
    fn id(self, codepage: Codepage) -> Option<u8> {
        match self {
            MappingProfile::Star => star_id(codepage),
        }
    }
}

fn star_id(codepage: Codepage) -> Option<u8> {
    let id = match codepage {
        Codepage::Cp437 => 1,
        Codepage::Cp858 => 4,
        Codepage::Cp852 => 5,
        Codepage::Cp860 => 6,
        Codepage::Cp861 => 7,
        Codepage::Cp863 => 8,
        Codepage::Cp865 => 9,
        Codepage::Cp866 => 10,
        Codepage::Cp855 => 11,
        Codepage::Cp857 => 12,
        Codepage::Cp862 => 13,
        Codepage::Cp737 => 15,
        Codepage::Cp869 => 17,
        Codepage::Cp874 => 21,
        Codepage::Cp1252 => 32,
        Codepage::Cp1250 => 33,
        Codepage::Cp1251 => 34,
        Codepage::Ascii | Codepage::Iso8859_1 => return None,
    };
    Some(id)
}

/// Which printer table id each code page selects.
///
/// Deserializes from either a profile name (`"star"`) or an object such as
/// `{"cp437": 0, "cp858": 19}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodepageMapping {
    Profile(MappingProfile),
    Custom(BTreeMap<Codepage, u8>),
}

impl Default for CodepageMapping {
    fn default() -> Self {
        CodepageMapping::Profile(MappingProfile::Star)
    }
}

impl CodepageMapping {
    /// Table id for a code page, `None` if this printer cannot select it.
    pub fn id(&self, codepage: Codepage) -> Option<u8> {
        match self {
            CodepageMapping::Profile(profile) => profile.id(codepage),
            CodepageMapping::Custom(map) => map.get(&codepage).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_profile() {
        let mapping = CodepageMapping::default();
        assert_eq!(mapping.id(Codepage::Cp437), Some(1));
        assert_eq!(mapping.id(Codepage::Cp858), Some(4));
        assert_eq!(mapping.id(Codepage::Cp1252), Some(32));
        assert_eq!(mapping.id(Codepage::Ascii), None);
        assert_eq!(mapping.id(Codepage::Iso8859_1), None);
    }

    #[test]
    fn test_custom_mapping() {
        let mapping: CodepageMapping =
            serde_json::from_str(r#"{"cp437": 0, "cp866": 17}"#).unwrap();
        assert_eq!(mapping.id(Codepage::Cp437), Some(0));
        assert_eq!(mapping.id(Codepage::Cp866), Some(17));
        assert_eq!(mapping.id(Codepage::Cp858), None);
    }

    #[test]
    fn test_profile_from_json() {
        let mapping: CodepageMapping = serde_json::from_str(r#""star""#).unwrap();
        assert_eq!(mapping, CodepageMapping::Profile(MappingProfile::Star));
    }

    #[test]
    fn test_custom_mapping_rejects_unknown_name() {
        assert!(serde_json::from_str::<CodepageMapping>(r#"{"cp999": 1}"#).is_err());
    }
}
