use alloy_json_abi::{Function, JsonAbi};

/// One selectable entry - the synthetic back entry returns to the contract choice
#[derive(Debug, Clone)]
pub enum FunctionChoice {
    Back,
    Function(Function),
}

/// Candidate functions for a query: named function entries filtered
/// case-insensitively by substring match, ranked by edit distance to the
/// query ascending (ties keep the ABI's iteration order). The empty query
/// additionally offers the back entry at position 0
pub fn function_choices(abi: &JsonAbi, query: &str) -> Vec<FunctionChoice> {
    let needle = query.to_lowercase();

    let mut ranked: Vec<(usize, usize, &Function)> = abi
        .functions()
        .enumerate()
        .filter(|(_, function)| {
            !function.name.is_empty() && function.name.to_lowercase().contains(&needle)
        })
        .map(|(position, function)| {
            (
                edit_distance(&needle, &function.name.to_lowercase()),
                position,
                function,
            )
        })
        .collect();

    ranked.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut choices = Vec::with_capacity(ranked.len() + 1);
    if query.is_empty() {
        choices.push(FunctionChoice::Back);
    }
    choices.extend(
        ranked
            .into_iter()
            .map(|(_, _, function)| FunctionChoice::Function(function.clone())),
    );

    choices
}

/// Levenshtein distance over chars
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
