//! Action extraction from model output.
//!
//! A reply requests a tool with a line of exactly this shape:
//!
//! ```text
//! AÇÃO: <name>: <argument>
//! ```
//!
//! `<name>` is one or more word characters (letters, digits, `_`), and
//! `<argument>` is the rest of the line verbatim, possibly empty. The line
//! must start at column 0 and both separators are a colon followed by one
//! space. Only the first matching line in a reply counts.
//!
//! Parsing is split in two: [`ActionDirective`] is the purely syntactic
//! match, [`Action`] resolves its name against the closed tool set.

use crate::tools::ToolKind;

/// Line prefix that marks an action request.
pub const ACTION_PREFIX: &str = "AÇÃO: ";

/// Prefix of the user prompt that carries a tool result back.
pub const OBSERVATION_PREFIX: &str = "OBSERVAÇÃO: ";

const NAME_SEPARATOR: &str = ": ";

/// A syntactically valid action line, not yet checked against any tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDirective {
    pub name: String,
    pub argument: String,
}

impl ActionDirective {
    pub fn new(name: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: argument.into(),
        }
    }

    /// Match a single line against the action grammar.
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix(ACTION_PREFIX)?;
        let name_len = rest
            .char_indices()
            .find(|(_, c)| !is_word_char(*c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        if name_len == 0 {
            return None;
        }
        let (name, tail) = rest.split_at(name_len);
        let argument = tail.strip_prefix(NAME_SEPARATOR)?;
        Some(Self::new(name, argument))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The first action line in `text`, if any. Later action lines are ignored.
pub fn parse_directive(text: &str) -> Option<ActionDirective> {
    text.lines().find_map(ActionDirective::parse_line)
}

/// The first action in `text`, resolved against the tool set.
///
/// `None` means the reply is a final answer.
pub fn parse_action(text: &str) -> Option<Action> {
    parse_directive(text).map(Action::from)
}

/// An action request: one variant per known tool, plus the names the model
/// made up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Calculate(String),
    LookupCost(String),
    CurrentWeather(String),
    Wikipedia(String),
    Unrecognized { name: String, argument: String },
}

impl Action {
    /// The tool this action runs, or `None` for an unrecognized name.
    pub fn kind(&self) -> Option<ToolKind> {
        match self {
            Self::Calculate(_) => Some(ToolKind::Calculate),
            Self::LookupCost(_) => Some(ToolKind::LookupCost),
            Self::CurrentWeather(_) => Some(ToolKind::CurrentWeather),
            Self::Wikipedia(_) => Some(ToolKind::Wikipedia),
            Self::Unrecognized { .. } => None,
        }
    }

    /// The action name as the model wrote it.
    pub fn name(&self) -> &str {
        match self {
            Self::Unrecognized { name, .. } => name,
            known => known
                .kind()
                .map(ToolKind::action_name)
                .unwrap_or_default(),
        }
    }

    pub fn argument(&self) -> &str {
        match self {
            Self::Calculate(arg)
            | Self::LookupCost(arg)
            | Self::CurrentWeather(arg)
            | Self::Wikipedia(arg) => arg,
            Self::Unrecognized { argument, .. } => argument,
        }
    }
}

impl From<ActionDirective> for Action {
    fn from(directive: ActionDirective) -> Self {
        let ActionDirective { name, argument } = directive;
        match name.parse::<ToolKind>() {
            Ok(ToolKind::Calculate) => Self::Calculate(argument),
            Ok(ToolKind::LookupCost) => Self::LookupCost(argument),
            Ok(ToolKind::CurrentWeather) => Self::CurrentWeather(argument),
            Ok(ToolKind::Wikipedia) => Self::Wikipedia(argument),
            Err(_) => Self::Unrecognized { name, argument },
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{ACTION_PREFIX}{}{NAME_SEPARATOR}{}", self.name(), self.argument())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_a_well_formed_line() {
        assert_eq!(
            ActionDirective::parse_line("AÇÃO: obter_custo: teclado"),
            Some(ActionDirective::new("obter_custo", "teclado"))
        );
    }

    #[test]
    fn argument_keeps_spaces_colons_and_punctuation() {
        assert_eq!(
            ActionDirective::parse_line("AÇÃO: calcular: (2*10) + (3*15): total!"),
            Some(ActionDirective::new("calcular", "(2*10) + (3*15): total!"))
        );
        assert_eq!(
            ActionDirective::parse_line("AÇÃO: wikipedia:   dois  espaços "),
            Some(ActionDirective::new("wikipedia", "  dois  espaços "))
        );
    }

    #[test]
    fn empty_argument_is_allowed() {
        assert_eq!(
            ActionDirective::parse_line("AÇÃO: wikipedia: "),
            Some(ActionDirective::new("wikipedia", ""))
        );
    }

    #[test]
    fn near_misses_do_not_match() {
        for line in [
            "AÇÃO:obter_custo: teclado",
            "AÇÃO: obter_custo:teclado",
            "AÇÃO: obter_custo teclado",
            "AÇÃO: obter-custo: teclado",
            "AÇÃO: : teclado",
            " AÇÃO: obter_custo: teclado",
            "ACAO: obter_custo: teclado",
            "ação: obter_custo: teclado",
            "AÇÃO: wikipedia:",
            "PENSAMENTO: AÇÃO: obter_custo: teclado",
        ] {
            assert_eq!(ActionDirective::parse_line(line), None, "{line:?}");
        }
    }

    #[test]
    fn unicode_word_characters_are_part_of_the_name() {
        assert_eq!(
            ActionDirective::parse_line("AÇÃO: pesquisa_café2: x"),
            Some(ActionDirective::new("pesquisa_café2", "x"))
        );
    }

    #[test]
    fn first_action_line_wins() {
        let text = "PENSAMENTO: preciso de duas coisas\n\
                    AÇÃO: obter_custo: mouse\n\
                    AÇÃO: calcular: 1 + 1\n\
                    PAUSA";
        assert_eq!(parse_action(text), Some(Action::LookupCost("mouse".into())));
    }

    #[test]
    fn crlf_terminator_is_not_part_of_the_argument() {
        let text = "PENSAMENTO: x\r\nAÇÃO: calcular: 2 * 3\r\nPAUSA\r\n";
        assert_eq!(parse_action(text), Some(Action::Calculate("2 * 3".into())));
    }

    #[test]
    fn no_action_line_means_final_answer() {
        assert_eq!(parse_action("RESPOSTA: Um teclado custa R$ 149,90."), None);
        assert_eq!(parse_action(""), None);
    }

    #[test]
    fn unknown_names_are_kept_verbatim() {
        let action = parse_action("AÇÃO: foo: bar").unwrap();
        assert_eq!(
            action,
            Action::Unrecognized {
                name: "foo".into(),
                argument: "bar".into()
            }
        );
        assert_eq!(action.kind(), None);
        assert_eq!(action.name(), "foo");
        assert_eq!(action.argument(), "bar");
    }

    #[test]
    fn known_names_resolve_to_variants() {
        let cases = [
            ("calcular", ToolKind::Calculate),
            ("obter_custo", ToolKind::LookupCost),
            ("obter_clima_atual", ToolKind::CurrentWeather),
            ("wikipedia", ToolKind::Wikipedia),
        ];
        for (name, kind) in cases {
            let action = Action::from(ActionDirective::new(name, "arg"));
            assert_eq!(action.kind(), Some(kind));
            assert_eq!(action.name(), name);
            assert_eq!(action.argument(), "arg");
        }
    }

    #[test]
    fn display_reproduces_the_action_line() {
        let action = Action::CurrentWeather("São Paulo".into());
        assert_eq!(action.to_string(), "AÇÃO: obter_clima_atual: São Paulo");
        assert_eq!(parse_action(&action.to_string()), Some(action));
    }
}
