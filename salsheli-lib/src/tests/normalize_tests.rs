use super::*;
use salsheli_catalog::{IconOverride, Rename, Rewrite, builtin_rules};

fn builtin() -> Normalizer {
    Normalizer::new(&builtin_rules().unwrap().normalize).unwrap()
}

fn literal(from: &str, to: &str) -> Substitution {
    Substitution {
        from: from.to_string(),
        to: to.to_string(),
        word_start: false,
    }
}

#[test]
fn test_percent_followed_by_letter_gets_space() {
    assert_eq!(builtin().normalize("חלב 3%טרה"), "חלב 3% טרה");
}

#[test]
fn test_letter_digit_boundaries() {
    let n = builtin();
    assert_eq!(n.normalize("חלב1.5ל"), "חלב 1.5 ליטר");
    assert_eq!(n.normalize("במבה80 גר"), "במבה 80 גרם");
}

#[test]
fn test_space_before_percent_removed() {
    assert_eq!(builtin().normalize("שמנת  חמוצה 15 % "), "שמנת חמוצה 15%");
}

#[test]
fn test_split_decimal_rejoined() {
    assert_eq!(
        builtin().normalize("יוגורט 3. 5% 150ג"),
        "יוגורט 3.5% 150 גרם"
    );
}

#[test]
fn test_abbreviation_at_word_start() {
    let n = builtin();
    assert_eq!(n.normalize("גב.צהובה 28%"), "גבינת צהובה 28%");
    assert_eq!(n.normalize("בקבוק ח.תפוחים"), "בקבוק חומץ תפוחים");
    // Not at a word start: left alone.
    assert_eq!(n.normalize("מלח."), "מלח.");
}

#[test]
fn test_typo_fix() {
    assert_eq!(builtin().normalize("מעודןנת שוקולד"), "מעודנת שוקולד");
}

#[test]
fn test_normalize_is_idempotent() {
    let n = builtin();
    let samples = [
        "חלב 3%טרה",
        "גב.צהובה28%פרוסות200ג",
        "יוג.תות 3. 5 %150 גר",
        "5מ.",
        "  שמפו   לשיער יבש 700מל  ",
        "לל״ג פתיתים",
        "ש.שועל דקה 500 ג",
        "קוטג' 5% 250 גרם",
        "4x100 יוגורט",
        "",
    ];
    for s in samples {
        let once = n.normalize(s);
        assert_eq!(n.normalize(&once), once, "not idempotent for {s:?}");
    }
}

#[test]
fn test_later_passes_see_rewrite_output() {
    let n = builtin();
    // The digit rewrite frees "מ." at a word start, which the next pass expands.
    assert_eq!(n.pass("שמפו 500מ."), "שמפו 500 מ.");
    assert_eq!(n.normalize("שמפו 500מ."), "שמפו 500 מרכך");
}

#[test]
fn test_substitution_order_is_significant() {
    let forward = NormalizeRules {
        substitutions: vec![literal("a", "b"), literal("b", "c")],
        ..Default::default()
    };
    let backward = NormalizeRules {
        substitutions: vec![literal("b", "c"), literal("a", "b")],
        ..Default::default()
    };
    assert_eq!(Normalizer::new(&forward).unwrap().normalize("a"), "c");
    // A second pass would turn "b" into "c" as well.
    assert_eq!(Normalizer::new(&backward).unwrap().normalize("a"), "c");
    assert_eq!(Normalizer::new(&backward).unwrap().pass("a"), "b");
}

#[test]
fn test_empty_rules_only_trim() {
    let n = Normalizer::default();
    assert_eq!(n.normalize("  חלב  טרי "), "חלב  טרי");
}

#[test]
fn test_empty_substitution_rejected() {
    let rules = NormalizeRules {
        substitutions: vec![literal("", "x")],
        ..Default::default()
    };
    assert!(matches!(
        Normalizer::new(&rules),
        Err(RuleError::EmptyPattern { .. })
    ));
}

#[test]
fn test_invalid_rewrite_rejected() {
    let rules = NormalizeRules {
        rewrites: vec![Rewrite {
            pattern: "(".to_string(),
            replacement: String::new(),
            description: None,
        }],
        ..Default::default()
    };
    assert!(matches!(
        Normalizer::new(&rules),
        Err(RuleError::InvalidPattern { .. })
    ));
}

#[test]
fn test_rename_short_circuits() {
    let rules = NormalizeRules {
        substitutions: vec![literal("חלב", "XXX")],
        renames: vec![Rename {
            from: "חלב טרי".to_string(),
            to: "חלב טרי 3% 1 ליטר".to_string(),
        }],
        ..Default::default()
    };
    let n = Normalizer::new(&rules).unwrap();
    assert_eq!(n.fix_name("חלב טרי"), "חלב טרי 3% 1 ליטר");
    assert_eq!(n.fix_name("חלב עמיד"), "XXX עמיד");
}

#[test]
fn test_icon_override_by_exact_name() {
    let rules = NormalizeRules {
        icon_overrides: vec![IconOverride {
            name: "קרם פטיסייר 250 גרם".to_string(),
            icon: "🍮".to_string(),
        }],
        ..Default::default()
    };
    let n = Normalizer::new(&rules).unwrap();
    assert_eq!(n.icon_override("קרם פטיסייר 250 גרם"), Some("🍮"));
    assert_eq!(n.icon_override("קרם פטיסייר"), None);
}

#[test]
fn test_clean_brand() {
    assert_eq!(clean_brand(" תנובה\n\r "), "תנובה");
    assert_eq!(clean_brand("שטראוס"), "שטראוס");
    assert_eq!(clean_brand(""), "");
}
