//! Typed values: colors, UUIDs, score and player objects, generic SNBT.

use super::{Number, Parser};
use crate::component::{PlayerProfile, ShadowColor, SnbtValue, TextColor, Uuid};
use crate::error::ParseError;
use std::collections::BTreeMap;

impl Parser<'_> {
    /// A named color or `#RRGGBB`.
    pub(crate) fn parse_color(&mut self) -> Result<TextColor, ParseError> {
        let start = self.pos();
        let value = self.parse_string()?;
        TextColor::parse(&value).ok_or_else(|| self.semantic(start, format!("Unknown color '{}'", value)))
    }

    /// A packed ARGB integer, a `#RRGGBBAA` string or `[r, g, b, a]` floats.
    pub(crate) fn parse_shadow_color(&mut self) -> Result<ShadowColor, ParseError> {
        let start = self.pos();
        match self.reader.peek() {
            Some('[') => {
                self.reader.bump();
                let mut channels = Vec::new();
                self.parse_sequence(']', "array", |p| {
                    let channel_pos = p.pos();
                    let literal = p.parse_number_literal()?;
                    let value = literal
                        .parse::<f32>()
                        .map_err(|_| p.syntax(channel_pos, format!("Invalid number '{}'", literal)))?;
                    channels.push(value);
                    Ok(())
                })?;
                let rgba: [f32; 4] = channels
                    .try_into()
                    .map_err(|_| self.semantic(start, "Shadow color needs exactly 4 channels"))?;
                ShadowColor::from_rgba(rgba)
                    .ok_or_else(|| self.semantic(start, "Shadow color channels must be between 0 and 1"))
            }
            Some('"' | '\'') => {
                let value = self.parse_string()?;
                ShadowColor::from_hex(&value)
                    .ok_or_else(|| self.semantic(start, format!("Invalid shadow color '{}'", value)))
            }
            Some(c) if super::is_number_start(c) => match self.parse_number()? {
                Number::Int(value) if (i32::MIN as i64..=u32::MAX as i64).contains(&value) => {
                    Ok(ShadowColor::from_argb(value as u32))
                }
                Number::Int(value) => {
                    Err(self.semantic(start, format!("Number '{}' is out of range", value)))
                }
                Number::Float(_) => Err(self.semantic(start, "Expected an integer")),
            },
            _ => Err(self.value_mismatch("a shadow color")),
        }
    }

    /// A hyphenated UUID string or four ints, optionally prefixed with `I;`.
    pub(crate) fn parse_uuid(&mut self) -> Result<Uuid, ParseError> {
        let start = self.pos();
        match self.reader.peek() {
            Some('[') => {
                self.reader.bump();
                self.reader.skip_whitespace();
                if self.reader.peek() == Some('I') && self.reader.peek_nth(1) == Some(';') {
                    self.reader.advance(2);
                }
                let mut words = Vec::new();
                self.parse_sequence(']', "array", |p| {
                    words.push(p.parse_int()?);
                    Ok(())
                })?;
                let words: [i32; 4] = words
                    .try_into()
                    .map_err(|_| self.semantic(start, "UUID arrays need exactly 4 integers"))?;
                Ok(Uuid::Ints(words))
            }
            Some('"' | '\'') => {
                let value = self.parse_string()?;
                if is_hyphenated_uuid(&value) {
                    Ok(Uuid::Text(value))
                } else {
                    Err(self.semantic(start, format!("Invalid UUID '{}'", value)))
                }
            }
            _ => Err(self.value_mismatch("a UUID")),
        }
    }

    /// Any value, kept untyped.
    pub(crate) fn parse_snbt(&mut self) -> Result<SnbtValue, ParseError> {
        self.nested(Self::parse_snbt_value)
    }

    fn parse_snbt_value(&mut self) -> Result<SnbtValue, ParseError> {
        match self.reader.peek() {
            Some('{') => {
                let mut map = BTreeMap::new();
                self.parse_object_entries(|p, key| {
                    map.insert(key.name, p.parse_snbt()?);
                    Ok(())
                })?;
                Ok(SnbtValue::Compound(map))
            }
            Some('[') => {
                self.reader.bump();
                self.reader.skip_whitespace();
                // Typed array prefixes carry no information we keep.
                if matches!(self.reader.peek(), Some('B' | 'I' | 'L')) && self.reader.peek_nth(1) == Some(';') {
                    self.reader.advance(2);
                }
                let mut items = Vec::new();
                self.parse_sequence(']', "array", |p| {
                    items.push(p.parse_snbt()?);
                    Ok(())
                })?;
                Ok(SnbtValue::List(items))
            }
            Some('"' | '\'') => Ok(SnbtValue::String(self.parse_string()?)),
            Some(c) if super::is_number_start(c) => Ok(match self.parse_number()? {
                Number::Int(value) => SnbtValue::Int(value),
                Number::Float(value) => SnbtValue::Float(value),
            }),
            Some(c) if super::is_bareword_start(c) => {
                let word = self.parse_bareword();
                Ok(match word.as_str() {
                    "true" => SnbtValue::Bool(true),
                    "false" => SnbtValue::Bool(false),
                    _ => SnbtValue::String(word),
                })
            }
            _ => Err(self.value_mismatch("a value")),
        }
    }

    /// `{name: ..., objective: ...}`.
    pub(crate) fn parse_score(&mut self) -> Result<(String, String), ParseError> {
        let mut name = None;
        let mut objective = None;
        let open = self.parse_object_entries(|p, key| {
            let slot = match key.name.as_str() {
                "name" => &mut name,
                "objective" => &mut objective,
                _ => return Err(p.unknown_key(&key)),
            };
            *slot = Some(p.parse_string()?);
            Ok(())
        })?;

        match (name, objective) {
            (Some(name), Some(objective)) => Ok((name, objective)),
            (None, _) => Err(self.semantic(open, "Missing required key 'name'")),
            (_, None) => Err(self.semantic(open, "Missing required key 'objective'")),
        }
    }

    /// A player name, or a profile object with at least one field.
    pub(crate) fn parse_player(&mut self) -> Result<PlayerProfile, ParseError> {
        match self.reader.peek() {
            Some('{') => {}
            Some(c) if c == '"' || c == '\'' || super::is_bareword_start(c) => {
                return self.parse_string().map(PlayerProfile::Name);
            }
            _ => return Err(self.value_mismatch("a player name or profile")),
        }

        let mut name = None;
        let mut id = None;
        let mut texture = None;
        let open = self.parse_object_entries(|p, key| {
            match key.name.as_str() {
                "name" => name = Some(p.parse_string()?),
                "id" => id = Some(p.parse_uuid()?),
                "texture" => texture = Some(p.parse_string()?),
                _ => return Err(p.unknown_key(&key)),
            }
            Ok(())
        })?;

        if name.is_none() && id.is_none() && texture.is_none() {
            return Err(self.semantic(open, "Player profile must not be empty"));
        }
        Ok(PlayerProfile::Profile { name, id, texture })
    }
}

/// `8-4-4-4-12` hex groups.
fn is_hyphenated_uuid(value: &str) -> bool {
    let groups: Vec<&str> = value.split('-').collect();
    groups.len() == 5
        && groups
            .iter()
            .zip([8, 4, 4, 4, 12])
            .all(|(group, len)| group.len() == len && group.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::types::Dialect;

    fn parser(source: &str) -> Parser<'static> {
        Parser::new(source, Dialect::Modern)
    }

    #[test]
    fn test_shadow_color_forms() {
        let expected = ShadowColor::from_argb(0xff00_00ff);
        assert_eq!(parser("4278190335").parse_shadow_color().unwrap(), expected);
        assert_eq!(parser("-16776961").parse_shadow_color().unwrap(), expected);
        assert_eq!(parser("'#0000FFFF'").parse_shadow_color().unwrap(), expected);
        assert_eq!(parser("[0.0, 0.0, 1.0, 1.0]").parse_shadow_color().unwrap(), expected);

        let err = parser("[0.0, 0.0, 2.0, 1.0]").parse_shadow_color().unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::Semantic);
        assert!(parser("[0.5, 0.5]").parse_shadow_color().is_err());
        assert!(parser("'#00FF'").parse_shadow_color().is_err());
    }

    #[test]
    fn test_uuid_forms() {
        assert_eq!(
            parser("'069a79f4-44e9-4726-a5be-fca90e38aaf5'").parse_uuid().unwrap(),
            Uuid::Text("069a79f4-44e9-4726-a5be-fca90e38aaf5".into())
        );
        assert_eq!(parser("[I; 1, -2, 3, 4]").parse_uuid().unwrap(), Uuid::Ints([1, -2, 3, 4]));
        assert_eq!(parser("[1,2,3,4]").parse_uuid().unwrap(), Uuid::Ints([1, 2, 3, 4]));
        assert!(parser("[1,2,3]").parse_uuid().is_err());
        assert!(parser("'not-a-uuid'").parse_uuid().is_err());
    }

    #[test]
    fn test_snbt_values() {
        let value = parser("{'minecraft:custom_name': 'Relic', damage: 3, wear: 0.5, tags: [I; 1, 2], glint: true}")
            .parse_snbt()
            .unwrap();
        let map = value.as_compound().unwrap();
        assert_eq!(map["minecraft:custom_name"], SnbtValue::String("Relic".into()));
        assert_eq!(map["damage"], SnbtValue::Int(3));
        assert_eq!(map["wear"], SnbtValue::Float(0.5));
        assert_eq!(map["tags"], SnbtValue::List(vec![SnbtValue::Int(1), SnbtValue::Int(2)]));
        assert_eq!(map["glint"], SnbtValue::Bool(true));
    }

    #[test]
    fn test_score_requires_both_fields() {
        assert_eq!(
            parser("{name:'@p', objective:kills}").parse_score().unwrap(),
            ("@p".to_string(), "kills".to_string())
        );
        let err = parser("{name:'@p'}").parse_score().unwrap_err();
        assert_eq!(err.message(), "Missing required key 'objective'");
        let err = parser("{name:'@p', objective:a, value:1}").parse_score().unwrap_err();
        assert_eq!(err.message(), "Unknown key 'value'");
    }

    #[test]
    fn test_player_forms() {
        assert_eq!(parser("'Steve'").parse_player().unwrap(), PlayerProfile::Name("Steve".into()));
        assert_eq!(
            parser("{name:'Alex', texture:'skins/alex'}").parse_player().unwrap(),
            PlayerProfile::Profile {
                name: Some("Alex".into()),
                id: None,
                texture: Some("skins/alex".into()),
            }
        );
        let err = parser("{}").parse_player().unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::Semantic);
    }
}
