//! Pain messages

/// Note describing how badly a hit hurt, given hit points after the hit
pub fn pain_note(hp_after: i32, dam: i32) -> &'static str {
    if dam <= 0 {
        return "is unharmed.";
    }

    let newhp = hp_after.max(0) as i64;
    let oldhp = newhp + dam as i64;
    let percentage = 100 * newhp / oldhp;

    match percentage {
        95.. => "shrugs off the attack.",
        75..=94 => "grunts with pain.",
        50..=74 => "cries out in pain.",
        35..=49 => "screams in pain.",
        20..=34 => "screams in agony.",
        10..=19 => "writhes in agony.",
        _ => "cries out feebly.",
    }
}
