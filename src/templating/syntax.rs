//! Delimiter sets and the translation of generator syntax into Tera syntax.
//!
//! Chart templates are rendered twice: once here, to fill in values from the
//! manifest, and once more by Helm at install time. Helm's `{{ … }}` spans
//! must survive the first pass untouched, so generator templates use their
//! own delimiters ([`Syntax::GENERATOR`]) that share no character with the
//! ones Helm reserves.
//!
//! Tera itself only understands brace delimiters. [`translate`] therefore
//! does two things in one scan:
//! - every downstream span (`{{ … }}`, `{% … %}`, `{# … #}`) is cut out and
//!   replaced by an opaque placeholder, to be restored after rendering
//! - every generator span is rewritten to the matching Tera span

use crate::core::ChartError;

/// Characters reserved by the chart runtime's template syntax.
pub const RUNTIME_RESERVED: &[char] = &['{', '}'];

/// Downstream spans protected from rendering, as (open, close) pairs.
const PASSTHROUGH_SPANS: [(&str, &str); 3] = [("{{", "}}"), ("{%", "%}"), ("{#", "#}")];

/// An opening and closing delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub open: &'static str,
    pub close: &'static str,
}

/// One delimiter pair per kind of template tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syntax {
    pub expression: Delimiters,
    pub statement: Delimiters,
    pub comment: Delimiters,
}

impl Syntax {
    /// The syntax generator templates are written in.
    pub const GENERATOR: Syntax = Syntax {
        expression: Delimiters {
            open: "[[",
            close: "]]",
        },
        statement: Delimiters {
            open: "[%",
            close: "%]",
        },
        comment: Delimiters {
            open: "[#",
            close: "#]",
        },
    };

    /// Tera's native syntax, which generator spans are translated into.
    pub const TERA: Syntax = Syntax {
        expression: Delimiters {
            open: "{{",
            close: "}}",
        },
        statement: Delimiters {
            open: "{%",
            close: "%}",
        },
        comment: Delimiters {
            open: "{#",
            close: "#}",
        },
    };

    fn pairs(&self) -> [Delimiters; 3] {
        [self.expression, self.statement, self.comment]
    }

    /// Every delimiter token of this syntax.
    pub fn tokens(&self) -> [&'static str; 6] {
        [
            self.expression.open,
            self.expression.close,
            self.statement.open,
            self.statement.close,
            self.comment.open,
            self.comment.close,
        ]
    }

    /// Check that no token is empty, no two openers coincide, and no token
    /// contains one of the `reserved` characters.
    ///
    /// # Errors
    ///
    /// [`ChartError::DelimiterConflict`] naming the first offending token.
    pub fn check_disjoint(&self, reserved: &[char]) -> Result<(), ChartError> {
        for token in self.tokens() {
            if token.is_empty() || token.contains(reserved) {
                return Err(ChartError::DelimiterConflict {
                    token: token.to_string(),
                });
            }
        }
        let openers = self.pairs().map(|d| d.open);
        for (i, open) in openers.iter().enumerate() {
            if openers[..i].contains(open) {
                return Err(ChartError::DelimiterConflict {
                    token: (*open).to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A template rewritten into Tera syntax, plus the protected downstream spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translated {
    pub source: String,
    pub passthrough: Vec<String>,
}

fn placeholder(index: usize) -> String {
    format!("__CHARTGEN_PASSTHROUGH_{index}__")
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

/// Rewrite `source` from `syntax` into Tera syntax, protecting downstream spans.
///
/// # Errors
///
/// Returns a message naming the line of the first unterminated span.
pub fn translate(source: &str, syntax: &Syntax) -> Result<Translated, String> {
    enum Span {
        Generator(Delimiters, Delimiters),
        Passthrough(&'static str),
    }

    let mut candidates: Vec<(&'static str, Span)> = Vec::new();
    for (own, tera) in syntax.pairs().into_iter().zip(Syntax::TERA.pairs()) {
        candidates.push((own.open, Span::Generator(own, tera)));
    }
    for (open, close) in PASSTHROUGH_SPANS {
        candidates.push((open, Span::Passthrough(close)));
    }

    let mut translated = Translated::default();
    let mut offset = 0;

    loop {
        let rest = &source[offset..];
        let next = candidates
            .iter()
            .filter_map(|(open, span)| rest.find(open).map(|pos| (pos, *open, span)))
            .min_by_key(|(pos, ..)| *pos);
        let Some((pos, open, span)) = next else {
            translated.source.push_str(rest);
            break;
        };

        translated.source.push_str(&rest[..pos]);
        let inner_start = pos + open.len();
        let close = match span {
            Span::Generator(own, _) => own.close,
            Span::Passthrough(close) => *close,
        };
        let Some(inner_len) = rest[inner_start..].find(close) else {
            return Err(format!(
                "unterminated `{open}` on line {}",
                line_of(source, offset + pos)
            ));
        };
        let end = inner_start + inner_len + close.len();

        match span {
            Span::Generator(_, tera) => {
                translated.source.push_str(tera.open);
                translated.source.push_str(&rest[inner_start..inner_start + inner_len]);
                translated.source.push_str(tera.close);
            }
            Span::Passthrough(_) => {
                translated.source.push_str(&placeholder(translated.passthrough.len()));
                translated.passthrough.push(rest[pos..end].to_string());
            }
        }
        offset += end;
    }

    Ok(translated)
}

/// Put protected downstream spans back into rendered output.
pub fn restore(rendered: &str, passthrough: &[String]) -> String {
    let mut result = rendered.to_string();
    for (index, original) in passthrough.iter().enumerate() {
        result = result.replace(&placeholder(index), original);
    }
    result
}
