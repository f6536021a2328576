use std::io::Write;

use deposit_ready::workflows::deposit::{
    get_all_state_slugs, get_all_states, get_state_rules_by_slug, DayUnit, RulesLoadError,
    RulesRegistry,
};

const HEADER: &str = "code,slug,name,statute_title,return_deadline,claim_deadline,day_unit,damages_multiplier,forfeits_on_late_notice,damages_description,additional_damages,max_small_claims,small_claims_note";

#[test]
fn slugs_enumerate_every_jurisdiction_in_catalog_order() {
    let slugs = get_all_state_slugs();
    let states = get_all_states();

    assert_eq!(slugs.len(), states.len());
    for (slug, rules) in slugs.iter().zip(states) {
        assert_eq!(*slug, rules.slug);
        assert_eq!(get_state_rules_by_slug(slug), Some(rules));
    }
    assert!(slugs.contains(&"district-of-columbia"));
}

#[test]
fn override_file_replaces_builtin_rows() {
    let path = std::env::temp_dir().join(format!(
        "deposit-ready-overrides-{}.csv",
        std::process::id()
    ));
    {
        let mut file = std::fs::File::create(&path).expect("create override file");
        writeln!(file, "{HEADER}").expect("write header");
        writeln!(
            file,
            "NV,nevada,Nevada,NRS 118A.242,30,30,business,2,true,Up to twice the deposit,None specified,10000,Justice court"
        )
        .expect("write row");
    }

    let registry = RulesRegistry::builtin()
        .with_overrides_from_path(&path)
        .expect("overrides load");
    std::fs::remove_file(&path).ok();

    assert_eq!(registry.len(), RulesRegistry::builtin().len());
    let nevada = registry.by_code("nv").expect("nevada present");
    assert_eq!(nevada.day_unit, DayUnit::Business);
    assert_eq!(nevada.return_deadline, 30);
}

#[test]
fn missing_override_file_is_an_io_error() {
    let result = RulesRegistry::builtin()
        .with_overrides_from_path("/nonexistent/deposit-rules.csv");
    assert!(matches!(result, Err(RulesLoadError::Io(_))));
}
