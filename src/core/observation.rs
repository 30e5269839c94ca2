/// Observation translation — environment feedback to narrated prose.
///
/// Real logs concatenate sentences, sometimes without spaces, so the
/// observation is split into sentences first and each one is matched
/// against the patterns below in priority order. Anything unmatched
/// falls through to a generic rewrite that never fails.

use crate::core::lexicon::{Lexicon, Lexicons};
use crate::core::story::{pick_one, PhrasePicker};
use crate::core::text::{
    contains_ci, find_ci, remove_all_ci, split_all_ci, split_once_any_ci, split_sentences,
};

/// Translate one observation string. Empty input yields empty output;
/// per-sentence translations are joined with a single space.
pub fn translate_observation(
    observation: &str,
    agent: &str,
    lexicons: &Lexicons,
    picker: &mut dyn PhrasePicker,
) -> String {
    if observation.is_empty() {
        return String::new();
    }

    split_sentences(observation)
        .iter()
        .map(|sentence| translate_sentence(sentence, agent, lexicons, picker))
        .collect::<Vec<_>>()
        .join(" ")
}

fn translate_sentence(
    sentence: &str,
    agent: &str,
    lexicons: &Lexicons,
    picker: &mut dyn PhrasePicker,
) -> String {
    let s = sentence.trim();

    if contains_ci(s, "middle of a room") {
        return pick_one(
            picker,
            vec![
                format!("{agent}は部屋の中央で立ち止まり、周囲を見渡しました。"),
                format!("{agent}は部屋の真ん中にいます。何から始めようかな。"),
                format!("{agent}は部屋の中心に立ち、作戦を練っています。"),
            ],
        );
    }

    if contains_ci(s, "nothing happens")
        || contains_ci(s, "nothing happened")
        || s.eq_ignore_ascii_case("nothing")
    {
        return "特に何もない事実。".to_string();
    }

    if contains_ci(s, "arrive at") || contains_ci(s, "are at") {
        let loc_part = split_all_ci(s, &["arrive at ", "are at "])
            .get(1)
            .copied()
            .unwrap_or(s);
        let loc = lexicons.locations.translate(loc_part);
        return pick_one(
            picker,
            vec![
                format!("{loc}に到着しました。"),
                format!("{loc}にたどり着いたようです。"),
                format!("{loc}の前まで来ました。"),
            ],
        );
    }

    if contains_ci(s, "you see") || contains_ci(s, "can see") || contains_ci(s, "yousee") {
        let items_part = split_all_ci(s, &["see ", "cansee "])
            .get(1)
            .copied()
            .unwrap_or(s);
        let items = translate_items(items_part, &lexicons.objects);
        return pick_one(
            picker,
            vec![
                format!("{items}が見えました。"),
                format!("そこには{items}があるようです。"),
                format!("周囲をよく見ると{items}を発見しました。"),
            ],
        );
    }

    // Compound "on the cabinet 1, you see a mug 2" observations. The
    // listing branch above claims any sentence naming what is seen, so
    // this only fires when both halves parse out without one.
    if contains_ci(s, "on the") {
        let loc_part = match split_once_any_ci(s, &["on the "]) {
            Some((_, rest)) => split_all_ci(rest, &[", ", " yousee ", " you see"])[0],
            None => "",
        };
        let items_part = split_all_ci(s, &["yousee ", "you see "])
            .get(1)
            .copied()
            .unwrap_or("");
        let loc = lexicons.locations.translate(loc_part);
        let items = translate_items(items_part, &lexicons.objects);
        if !loc.is_empty() && !items.is_empty() {
            return pick_one(
                picker,
                vec![
                    format!("{loc}の上を確認すると、{items}が置いてありました。"),
                    format!("{loc}の上には、{items}が置かれているのがわかります。"),
                    format!("{loc}を見ると、{items}が並んでいました。"),
                ],
            );
        }
    }

    if contains_ci(s, "open the") || contains_ci(s, "openthe") || contains_ci(s, "you open") {
        let stripped = match split_once_any_ci(s, &["you open ", "openthe ", "open the "]) {
            Some((before, after)) => format!("{before}{after}"),
            None => s.to_string(),
        };
        let loc_part = stripped
            .split(['.', ' '])
            .next()
            .unwrap_or("");
        let loc = lexicons.locations.translate(loc_part);

        if contains_ci(s, "nothing") {
            return pick_one(
                picker,
                vec![
                    format!("{loc}を開けましたが、中は空っぽでした。"),
                    format!("{loc}の中には何も入っていないようです。"),
                    format!("{loc}を覗きましたが、何も見つかりませんでした。"),
                ],
            );
        }

        let items_part = split_all_ci(s, &["see ", "inside", "there"])
            .get(1)
            .copied()
            .unwrap_or("");
        let items = translate_items(items_part, &lexicons.objects);
        if !items.is_empty() {
            return pick_one(
                picker,
                vec![
                    format!("{loc}を開けると、中には{items}が入っていました。"),
                    format!("{loc}の内部には、{items}があるのを確認しました。"),
                    format!("{loc}を開けたところ、{items}が見つかりました。"),
                ],
            );
        }
        return format!("{loc}を開けました。");
    }

    if contains_ci(s, "is open") || contains_ci(s, "isopen") {
        let loc_part = strip_state_words(s, &["the ", "is open", "isopen"]);
        let loc = lexicons.locations.translate(&loc_part);
        return format!("{loc}が開いています。");
    }

    if contains_ci(s, "is closed") || contains_ci(s, "isclosed") {
        let loc_part = strip_state_words(s, &["the ", "is closed", "isclosed"]);
        let loc = lexicons.locations.translate(&loc_part);
        return format!("{loc}が閉じています。");
    }

    if contains_ci(s, "pick up") {
        let segments = split_all_ci(s, &["from"]);
        let obj_part = match split_once_any_ci(segments[0], &["pick up ", "you "]) {
            Some((before, after)) => format!("{before}{after}"),
            None => segments[0].to_string(),
        };
        let obj = lexicons.objects.translate(obj_part.trim());
        let loc_str = match segments.get(1) {
            Some(loc_part) => format!("{}から", lexicons.locations.translate(loc_part.trim())),
            None => String::new(),
        };
        return pick_one(
            picker,
            vec![
                format!("{loc_str}{obj}を持ち上げ、大切に抱えました。"),
                format!("{loc_str}{obj}をひょいと持ち上げました。"),
                format!("{loc_str}{obj}を手に入れました。"),
            ],
        );
    }

    generic_sentence(s, agent, &lexicons.locations)
}

/// Split an item listing on commas and "and", translate each item,
/// and join with the Japanese list separator.
fn translate_items(items_part: &str, objects: &Lexicon) -> String {
    split_all_ci(items_part, &[", ", " and ", "and"])
        .iter()
        .map(|item| objects.translate(item))
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join("、")
}

fn strip_state_words(sentence: &str, words: &[&str]) -> String {
    let mut out = sentence.to_string();
    for word in words {
        out = remove_all_ci(&out, word);
    }
    out.trim().to_string()
}

/// Last-resort rewrite: translate literal "You are at/in X" shapes,
/// relabel the remaining "You", and terminate the sentence.
fn generic_sentence(sentence: &str, agent: &str, locations: &Lexicon) -> String {
    let mut out = sentence.to_string();
    if let Some(i) = find_ci(&out, "you are at ") {
        let loc = locations.translate(&out[i + "you are at ".len()..]);
        out = format!("{}{}に到着しました。", &out[..i], loc);
    } else if let Some(i) = find_ci(&out, "you are in ") {
        let loc = locations.translate(&out[i + "you are in ".len()..]);
        out = format!("{}{}の中にいます。", &out[..i], loc);
    }
    let mut out = out.replace("You", agent);
    if !out.ends_with('。') {
        out.push('。');
    }
    out
}
