/// Message for a command path that has no service mapping, with a close match when one exists.
pub fn unknown_command_message(command: &str, known_commands: &[&str]) -> String {
    let normalized = command.split_whitespace().collect::<Vec<_>>().join(" ");
    match suggest_command(&normalized.to_lowercase(), known_commands) {
        Some(suggestion) => format!(
            "unknown command: {normalized}\ndid you mean {suggestion}?\nrun --auth-services-list to see registered services"
        ),
        None => format!(
            "unknown command: {normalized}\nrun --auth-services-list to see registered services"
        ),
    }
}

fn suggest_command<'a>(command: &str, known_commands: &'a [&str]) -> Option<&'a str> {
    if command.is_empty() {
        return None;
    }

    if let Some(prefix_match) = known_commands
        .iter()
        .copied()
        .find(|candidate| candidate.starts_with(command))
    {
        return Some(prefix_match);
    }

    let mut best: Option<(&str, usize)> = None;
    for candidate in known_commands.iter().copied() {
        let distance = levenshtein_distance(command, candidate);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    let (candidate, distance) = best?;
    let threshold = match command.len() {
        0..=4 => 1,
        5..=8 => 2,
        _ => 3,
    };
    if distance <= threshold {
        Some(candidate)
    } else {
        None
    }
}

fn levenshtein_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    if a.is_empty() {
        return b.chars().count();
    }
    if b.is_empty() {
        return a.chars().count();
    }

    let b_chars = b.chars().collect::<Vec<_>>();
    let mut previous = (0..=b_chars.len()).collect::<Vec<_>>();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, left) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, right) in b_chars.iter().enumerate() {
            let substitution_cost = if left == *right { 0 } else { 1 };
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            let substitution = previous[j] + substitution_cost;
            current[j + 1] = deletion.min(insertion).min(substitution);
        }
        previous.clone_from_slice(&current);
    }

    previous[b_chars.len()]
}
