use crate::types::{
    CompileError, FilterComparers, FilteredSetter, RuleSpec, Setter, Tagger, TrackField,
};

/// Keys in a rule-spec that do not name tag fields. `filter` is consumed
/// here; `field` belongs to a higher-level router and is skipped.
const RESERVED_KEYS: &[&str] = &["filter", "field"];

pub(crate) fn compile(specs: &[RuleSpec]) -> Result<Tagger, CompileError> {
    let rules = specs
        .iter()
        .enumerate()
        .map(|(rule, spec)| compile_rule(rule, spec))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Tagger { rules })
}

fn compile_rule(rule: usize, spec: &RuleSpec) -> Result<FilteredSetter, CompileError> {
    let filter_spec = spec
        .0
        .get("filter")
        .ok_or(CompileError::MissingFilter { rule })?;
    let filter = FilterComparers::from_spec(filter_spec)
        .map_err(|source| CompileError::InvalidFilterSpec { rule, source })?;

    // Setter order is key appearance order, minus the reserved keys.
    let mut setters = Vec::new();
    for (key, value) in &spec.0 {
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let field = TrackField::from_name(key).ok_or_else(|| CompileError::UnknownField {
            rule,
            name: key.clone(),
        })?;
        let setter = Setter::from_spec(field, value)
            .map_err(|source| CompileError::InvalidSetterSpec {
                rule,
                field,
                source,
            })?;
        setters.push(setter);
    }

    Ok(FilteredSetter::new(filter, setters))
}
