//! Celebration types selected by the first path segment.

/// A celebration type with its display properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occasion {
    /// URL prefix, e.g. `aniversario`. Empty for the default occasion.
    pub prefix: &'static str,
    pub greeting: &'static str,
    pub subtitle: &'static str,
    pub emoji: &'static str,
}

impl Occasion {
    /// Returns true for the plain "Parabéns" occasion.
    pub fn is_default(&self) -> bool {
        self.prefix.is_empty()
    }
}

pub const DEFAULT_OCCASION: Occasion = Occasion {
    prefix: "",
    greeting: "Parabéns",
    subtitle: "Celebrando com balões e confetes",
    emoji: "🎉",
};

pub const OCCASIONS: &[Occasion] = &[
    Occasion {
        prefix: "aniversario",
        greeting: "Feliz Aniversário",
        subtitle: "Celebrando mais um ano de vida",
        emoji: "🎂",
    },
    Occasion {
        prefix: "formatura",
        greeting: "Parabéns pela formatura",
        subtitle: "Uma conquista para celebrar",
        emoji: "🎓",
    },
    Occasion {
        prefix: "promocao",
        greeting: "Parabéns pela promoção",
        subtitle: "Seu esforço foi reconhecido",
        emoji: "🏆",
    },
    Occasion {
        prefix: "casamento",
        greeting: "Felicidades",
        subtitle: "Celebrando o amor",
        emoji: "💒",
    },
    Occasion {
        prefix: "boas-vindas",
        greeting: "Boas-vindas",
        subtitle: "É um prazer ter você aqui",
        emoji: "👋",
    },
];

/// Looks up an occasion by its URL prefix (case-insensitive).
pub fn find_occasion(prefix: &str) -> Option<Occasion> {
    OCCASIONS
        .iter()
        .find(|o| o.prefix.eq_ignore_ascii_case(prefix))
        .copied()
}

/// Splits a request path into its occasion and the raw (still encoded) message.
///
/// ```ignore
/// // "/aniversario/Joana" -> (aniversario, "Joana")
/// // "/Joana"             -> (default, "Joana")
/// ```
pub fn parse_occasion_from_path(path: &str) -> (Occasion, &str) {
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return (DEFAULT_OCCASION, "");
    }

    let (head, rest) = match path.split_once('/') {
        Some((head, rest)) => (head, rest),
        None => (path, ""),
    };

    match find_occasion(head) {
        Some(occasion) => (occasion, rest),
        None => (DEFAULT_OCCASION, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_occasion() {
        let (occasion, message) = parse_occasion_from_path("/Joana");
        assert!(occasion.is_default());
        assert_eq!(message, "Joana");
    }

    #[test]
    fn test_parse_empty_path() {
        let (occasion, message) = parse_occasion_from_path("/");
        assert!(occasion.is_default());
        assert_eq!(message, "");
    }

    #[test]
    fn test_parse_known_prefix() {
        let (occasion, message) = parse_occasion_from_path("/aniversario/Jo%C3%A3o");
        assert_eq!(occasion.prefix, "aniversario");
        assert_eq!(occasion.greeting, "Feliz Aniversário");
        assert_eq!(message, "Jo%C3%A3o");
    }

    #[test]
    fn test_parse_prefix_only() {
        let (occasion, message) = parse_occasion_from_path("/formatura");
        assert_eq!(occasion.prefix, "formatura");
        assert_eq!(message, "");
    }

    #[test]
    fn test_parse_prefix_case_insensitive() {
        let (occasion, _) = parse_occasion_from_path("/CASAMENTO/Ana_e_Bia");
        assert_eq!(occasion.prefix, "casamento");
    }

    #[test]
    fn test_unknown_prefix_keeps_full_message() {
        let (occasion, message) = parse_occasion_from_path("/festa/Joana");
        assert!(occasion.is_default());
        assert_eq!(message, "festa/Joana");
    }
}
