use super::BridgeError;

/// A decoded script result.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    /// No result (`missing value`, or the script returned nothing).
    Missing,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    List(Vec<ScriptValue>),
}

/// Enumerator names osascript prints in place of the four-char codes the
/// player state contract is written against.
const ENUM_CODES: &[(&str, &str)] = &[
    ("paused", "kPSp"),
    ("playing", "kPSP"),
    ("stopped", "kPSS"),
    ("fast forwarding", "kPSF"),
    ("rewinding", "kPSR"),
];

impl ScriptValue {
    /// Text coercion: numbers and booleans are rendered, lists are not.
    pub fn as_text(&self) -> Option<String> {
        match self {
            ScriptValue::Text(s) => Some(s.clone()),
            ScriptValue::Integer(i) => Some(i.to_string()),
            ScriptValue::Real(r) => Some(r.to_string()),
            ScriptValue::Boolean(b) => Some(b.to_string()),
            ScriptValue::Missing | ScriptValue::List(_) => None,
        }
    }

    /// Text items only; any other kind yields `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScriptValue::Integer(i) => Some(*i as f64),
            ScriptValue::Real(r) => Some(*r),
            // Localised decimal separators show up when numbers travel as text
            ScriptValue::Text(s) => s.trim().replace(',', ".").parse().ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScriptValue::Integer(i) => Some(*i),
            ScriptValue::Real(r) if r.is_finite() => Some(r.trunc() as i64),
            ScriptValue::Text(s) => {
                let s = s.trim();
                s.parse()
                    .ok()
                    .or_else(|| s.replace(',', ".").parse::<f64>().ok().map(|f| f as i64))
            }
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[ScriptValue]> {
        match self {
            ScriptValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Parses osascript's source-form (`-ss`) output.
    pub fn parse(output: &str) -> Result<ScriptValue, BridgeError> {
        let output = output.trim();
        if output.is_empty() {
            return Ok(ScriptValue::Missing);
        }
        let mut parser = Parser {
            chars: output.chars().collect(),
            pos: 0,
        };
        let value = parser.value()?;
        parser.skip_ws();
        if parser.pos != parser.chars.len() {
            return Err(BridgeError::Parse(format!(
                "trailing input at {} in {:?}",
                parser.pos, output
            )));
        }
        Ok(value)
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn error(&self, what: &str) -> BridgeError {
        BridgeError::Parse(format!("{} at offset {}", what, self.pos))
    }

    fn value(&mut self) -> Result<ScriptValue, BridgeError> {
        self.skip_ws();
        match self.peek() {
            Some('"') => self.string(),
            Some('{') => self.list(),
            Some('«') => self.raw_constant(),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(),
            Some(_) => self.word(),
            None => Err(self.error("unexpected end of output")),
        }
    }

    fn string(&mut self) -> Result<ScriptValue, BridgeError> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.pos += 1;
                    return Ok(ScriptValue::Text(out));
                }
                Some('\\') => {
                    self.pos += 1;
                    let escaped = self.peek().ok_or_else(|| self.error("dangling escape"))?;
                    out.push(match escaped {
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        other => other,
                    });
                    self.pos += 1;
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn list(&mut self) -> Result<ScriptValue, BridgeError> {
        self.pos += 1;
        let mut items = Vec::new();
        self.skip_ws();
        if self.peek() == Some('}') {
            self.pos += 1;
            return Ok(ScriptValue::List(items));
        }
        loop {
            items.push(self.value()?);
            self.skip_ws();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    return Ok(ScriptValue::List(items));
                }
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }
    }

    /// `«constant ****kPSp»` → `kPSp`; other raw forms keep their inner text.
    fn raw_constant(&mut self) -> Result<ScriptValue, BridgeError> {
        self.pos += 1;
        let start = self.pos;
        while self.peek().is_some_and(|c| c != '»') {
            self.pos += 1;
        }
        if self.peek().is_none() {
            return Err(self.error("unterminated raw constant"));
        }
        let inner: String = self.chars[start..self.pos].iter().collect();
        self.pos += 1;
        let code = inner
            .strip_prefix("constant ****")
            .or_else(|| inner.strip_prefix("constant "))
            .unwrap_or(&inner);
        Ok(ScriptValue::Text(code.trim().to_string()))
    }

    fn number(&mut self) -> Result<ScriptValue, BridgeError> {
        let start = self.pos;
        self.pos += 1;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | 'E' | 'e' | '+' | '-'))
        {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        if let Ok(i) = text.parse::<i64>() {
            return Ok(ScriptValue::Integer(i));
        }
        text.parse::<f64>()
            .map(ScriptValue::Real)
            .map_err(|_| self.error("malformed number"))
    }

    /// Bare words: booleans, `missing value`, and enumerator names.
    fn word(&mut self) -> Result<ScriptValue, BridgeError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| !matches!(c, ',' | '}')) {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();
        let word = word.trim();
        Ok(match word {
            "true" => ScriptValue::Boolean(true),
            "false" => ScriptValue::Boolean(false),
            "missing value" => ScriptValue::Missing,
            _ => {
                let code = ENUM_CODES
                    .iter()
                    .find(|(name, _)| *name == word)
                    .map(|(_, code)| *code)
                    .unwrap_or(word);
                ScriptValue::Text(code.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(ScriptValue::parse("").unwrap(), ScriptValue::Missing);
        assert_eq!(ScriptValue::parse("42\n").unwrap(), ScriptValue::Integer(42));
        assert_eq!(ScriptValue::parse("12.5").unwrap(), ScriptValue::Real(12.5));
        assert_eq!(ScriptValue::parse("true").unwrap(), ScriptValue::Boolean(true));
        assert_eq!(
            ScriptValue::parse("missing value").unwrap(),
            ScriptValue::Missing
        );
    }

    #[test]
    fn test_parse_track_list() {
        let value = ScriptValue::parse(r#"{"Song \"A\"", "Artist, Inc", "Album"}"#).unwrap();
        let items = value.items().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_str(), Some("Song \"A\""));
        assert_eq!(items[1].as_str(), Some("Artist, Inc"));
    }

    #[test]
    fn test_player_state_codes() {
        assert_eq!(
            ScriptValue::parse("«constant ****kPSp»").unwrap(),
            ScriptValue::Text("kPSp".into())
        );
        assert_eq!(
            ScriptValue::parse("playing").unwrap(),
            ScriptValue::Text("kPSP".into())
        );
        assert_eq!(
            ScriptValue::parse("paused").unwrap(),
            ScriptValue::Text("kPSp".into())
        );
    }

    #[test]
    fn test_numeric_coercions() {
        assert_eq!(ScriptValue::Text("3,25".into()).as_f64(), Some(3.25));
        assert_eq!(ScriptValue::Real(74.9).as_i64(), Some(74));
        assert_eq!(ScriptValue::Missing.as_f64(), None);
    }

    #[test]
    fn test_unterminated_string_is_error() {
        assert!(ScriptValue::parse("\"oops").is_err());
    }
}
