use super::*;
use salsheli_catalog::{ReclassifyPlan, builtin_rules};

fn plan(id: &str) -> ReclassifyPlan {
    builtin_rules().unwrap().reclassify_plan(id).unwrap().clone()
}

fn rule(partition: &str, include: &[&str], exclude: &[&str]) -> ClassRule {
    ClassRule {
        partition: partition.to_string(),
        label: None,
        include: include.iter().map(|s| s.to_string()).collect(),
        exclude: exclude.iter().map(|s| s.to_string()).collect(),
        icon: None,
    }
}

#[test]
fn test_exclusion_vetoes_match() {
    let alcohol = plan("alcohol");
    assert!(classify("בירה בלונד 0% אלכוהול", &alcohol.rules).is_none());
    assert!(classify("חומץ יין אדום", &alcohol.rules).is_none());
}

#[test]
fn test_inclusion_matches() {
    let alcohol = plan("alcohol");
    let hit = classify("בירה גולדסטאר 500 מ״ל", &alcohol.rules).unwrap();
    assert_eq!(hit.partition, "alcohol");
    assert!(classify("מיץ תפוזים 1 ליטר", &alcohol.rules).is_none());
}

#[test]
fn test_case_insensitive() {
    let other = plan("other");
    let hit = classify("Marlboro Gold", &other.rules).unwrap();
    assert_eq!(hit.partition, "tobacco");
}

#[test]
fn test_first_match_wins() {
    let rules = vec![
        rule("first", &["שוקולד"], &[]),
        rule("second", &["שוקולד", "חלב"], &[]),
    ];
    assert_eq!(classify("שוקולד חלב", &rules).unwrap().partition, "first");
    assert_eq!(classify("חלב", &rules).unwrap().partition, "second");
}

#[test]
fn test_exclusion_only_affects_its_own_rule() {
    let rules = vec![
        rule("alcohol", &["בירה"], &["0% אלכוהול"]),
        rule("beverages", &["בירה"], &[]),
    ];
    let hit = classify("בירה 0% אלכוהול", &rules).unwrap();
    assert_eq!(hit.partition, "beverages");
}

#[test]
fn test_empty_keyword_never_matches() {
    let rules = vec![rule("anything", &[""], &[])];
    assert!(classify("מוצר כלשהו", &rules).is_none());
}

#[test]
fn test_pick_icon_uses_also_keywords() {
    let icon = &plan("alcohol").rules[0].icon.clone().unwrap();
    assert_eq!(pick_icon("יין רוזה 750 מ״ל", &icon.rules), Some("🍷"));
    assert_eq!(pick_icon("יין לבן שרדונה", &icon.rules), Some("🍾"));
    assert_eq!(pick_icon("יין אדום קברנה", &icon.rules), Some("🍷"));
    assert_eq!(pick_icon("וויסקי ג'וני ווקר", &icon.rules), Some("🥃"));
    assert_eq!(pick_icon("וודקה סמירנוף", &icon.rules), Some("🍸"));
    assert_eq!(pick_icon("קוקטייל בטעם רום", &icon.rules), Some("🍹"));
    assert_eq!(pick_icon("טקילה", &icon.rules), None);
}

#[test]
fn test_assigned_icon_always_falls_back_to_default() {
    let icon = plan("alcohol").rules[0].icon.clone().unwrap();
    let tequila = Product::new("טקילה", "משקאות").with_icon("🥤");
    assert_eq!(assigned_icon(&tequila, &icon), Some("🍺"));
}

#[test]
fn test_assigned_icon_generic_only() {
    let hygiene = plan("other").rules[1].icon.clone().unwrap();
    let generic = Product::new("שמפו לשיער", "אחר");
    let specific = Product::new("שמפו לשיער", "אחר").with_icon("🧼");
    assert_eq!(assigned_icon(&generic, &hygiene), Some("🧴"));
    assert_eq!(assigned_icon(&specific, &hygiene), None);
}

#[test]
fn test_generic_icon_fix() {
    let tables = builtin_rules().unwrap().icons;
    let juice = Product::new("מיץ תפוזים", "משקאות");
    assert_eq!(generic_icon_fix(&juice, "beverages", &tables), Some("🧃"));

    let already = Product::new("מיץ תפוזים", "משקאות").with_icon("🍊");
    assert_eq!(generic_icon_fix(&already, "beverages", &tables), None);

    assert_eq!(generic_icon_fix(&juice, "no_such_partition", &tables), None);
}
