/// Action translation — one log command to one narrated line.
///
/// Commands are classified by their first word; each class pulls the
/// object/location substrings out with class-specific prepositions,
/// translates them, and fills one of a few phrasings chosen by the
/// injected picker.

use crate::core::lexicon::Lexicons;
use crate::core::story::{pick_one, PhrasePicker};
use crate::core::text::{
    contains_ci, remove_all_ci, remove_first_ci, split_all_ci, split_once_any_ci,
};
use crate::schema::episode::Step;

/// Leading hedge phrases stripped from thoughts before the
/// inner-voice line is rendered.
const HEDGES: &[&str] = &["I should ", "I will ", "First, ", "Now ", "I need to "];

/// Translate one step's action into a narrated line. Housekeeping
/// actions (`start`, `look`, task-succeeded echoes) are suppressed.
pub fn translate_action(
    step: &Step,
    agent: &str,
    lexicons: &Lexicons,
    picker: &mut dyn PhrasePicker,
) -> String {
    let action = step.action.as_str();
    if action.is_empty()
        || action == "start"
        || action == "look"
        || action.contains("task succeeded")
    {
        return String::new();
    }

    let mut clean_action = action.to_string();
    let mut thought = step.thought.clone();

    if action.contains("THOUGHT:") {
        let (head, tail) = split_once_any_ci(action, &["action:"]).unwrap_or((action, ""));
        let extracted = remove_first_ci(head, "thought:").trim().to_string();
        if !extracted.is_empty() && !thought.contains(&extracted) {
            thought = if thought.is_empty() {
                extracted
            } else {
                format!("{extracted} {thought}")
            };
        }
        let tail = tail.trim();
        if !tail.is_empty() {
            clean_action = tail.to_string();
        }
    } else if action.contains("ACTION:") {
        clean_action = split_all_ci(action, &["action:"])
            .get(1)
            .copied()
            .unwrap_or("")
            .trim()
            .to_string();
    }

    let mut result = String::new();
    if !thought.is_empty() {
        let mut inner = thought;
        for hedge in HEDGES {
            inner = remove_all_ci(&inner, hedge);
        }
        result.push_str(&format!("（心の声: {inner}）\n"));
    }

    let head = clean_action
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();

    if head == "go" && clean_action.contains("to") {
        let loc_part = segment(&clean_action, &[" to "], 1);
        let loc = lexicons.locations.translate(loc_part);
        return result
            + &pick_one(
                picker,
                vec![
                    format!("{agent}はゆっくりと{loc}の方へ歩いていきました。"),
                    format!("{agent}は{loc}まで移動することにしました。"),
                    format!("{agent}はとぼとぼと{loc}へ向かいました。"),
                ],
            );
    }

    if head == "take" || head == "pick" {
        let segments = split_all_ci(&clean_action, &[" from ", " in ", " on "]);
        let obj_part = remove_first_of(segments[0], &["take ", "pick up "]);
        let loc_part = segments.get(1).copied().unwrap_or("");
        let obj = lexicons.objects.translate(obj_part.trim());
        let loc_str = if loc_part.is_empty() {
            String::new()
        } else {
            format!("{}にある", lexicons.locations.translate(loc_part))
        };
        return result
            + &pick_one(
                picker,
                vec![
                    format!("{loc_str}{obj}を手に取りました。"),
                    format!("{loc_str}{obj}をそっと持ち上げました。"),
                    format!("{loc_str}{obj}を確保しました。よし。"),
                ],
            );
    }

    if head == "put" || head == "move" {
        let segments = split_all_ci(&clean_action, &[" in ", " on ", " to "]);
        let obj_part = remove_first_of(segments[0], &["put ", "move "]);
        let loc_part = segments.get(1).copied().unwrap_or("");
        let obj = lexicons.objects.translate(obj_part.trim());
        let loc = lexicons.locations.translate(loc_part);

        // Bulk placement keeps its single fixed phrasing.
        if clean_action.contains("two") {
            return result + &format!("２ついれるんだ！ {obj}を{loc}に。");
        }

        let verb = if head == "move" {
            "動かすことにしました"
        } else {
            "置きました"
        };
        return result
            + &pick_one(
                picker,
                vec![
                    format!("{agent}は{obj}を{loc}へ{verb}。"),
                    format!("大事に持っていた{obj}を{loc}に{verb}。"),
                    format!("{obj}を{loc}に配置完了です。"),
                ],
            );
    }

    if head == "clean" {
        let obj = lexicons.objects.translate(stripped_object(&clean_action, "clean "));
        return result
            + &pick_one(
                picker,
                vec![
                    format!("{obj}を丁寧に洗い、きれいにしました。"),
                    format!("{obj}の汚れを落としてピカピカにしました。"),
                    format!("{obj}をきれいに掃除しました。気持ちいい！"),
                ],
            );
    }

    if head == "heat" {
        let obj = lexicons.objects.translate(stripped_object(&clean_action, "heat "));
        return result
            + &pick_one(
                picker,
                vec![
                    format!("{obj}を温めました。ホカホカです。"),
                    format!("{obj}を電子レンジやコンロを使って温めました。"),
                    format!("{obj}がいい感じに温まったようです。"),
                ],
            );
    }

    if head == "cool" {
        let obj = lexicons.objects.translate(stripped_object(&clean_action, "cool "));
        return result
            + &pick_one(
                picker,
                vec![
                    format!("{obj}を冷やしました。ひんやりとしています。"),
                    format!("{obj}を冷蔵庫などで冷やしました。"),
                    format!("{obj}が十分に冷たくなったようです。"),
                ],
            );
    }

    if head == "examine" {
        let obj = lexicons
            .objects
            .translate(remove_first_ci(&clean_action, "examine ").trim());
        return result
            + &pick_one(
                picker,
                vec![
                    format!("これは{obj}だね。{agent}はじっくりと観察しました。"),
                    format!("これは{obj}だね。何か異常がないかジロジロ見ました。"),
                    format!("これは{obj}だね。詳しく調べてみました。"),
                ],
            );
    }

    if head == "open" {
        let obj = lexicons
            .locations
            .translate(remove_first_ci(&clean_action, "open ").trim());
        return result
            + &pick_one(
                picker,
                vec![
                    format!("{obj}を静かに開けました。"),
                    format!("{obj}の中身を確認するために開けました。"),
                    format!("{obj}の扉を引きました。"),
                ],
            );
    }

    if head == "close" {
        let obj = lexicons
            .locations
            .translate(remove_first_ci(&clean_action, "close ").trim());
        return result
            + &pick_one(
                picker,
                vec![
                    format!("{obj}を閉めることにしたのは、{agent}でした。"),
                    format!("{obj}を閉めることにしたのは、次へ進むためです。"),
                    format!("{obj}をパタンと閉じました。"),
                ],
            );
    }

    if head == "turn" {
        let obj_part = remove_first_of(&clean_action, &["turn on ", "turn off "]);
        let obj = lexicons.objects.translate(obj_part.trim());
        let is_on = contains_ci(&clean_action, "on");
        if is_on && (obj_part.contains("lamp") || obj_part.contains("light")) {
            return result + &format!("{obj}の明かりをともす。");
        }
        let state = if is_on {
            "スイッチを入れました。"
        } else {
            "スイッチを切りました。"
        };
        return result + &format!("{obj}の{state}");
    }

    result + &format!("{agent}は「{clean_action}」という行動をとりました。")
}

/// Segment `index` of a case-insensitive split, or empty.
fn segment<'a>(text: &'a str, separators: &[&str], index: usize) -> &'a str {
    split_all_ci(text, separators).get(index).copied().unwrap_or("")
}

/// Remove the earliest occurrence of any listed phrase.
fn remove_first_of(text: &str, phrases: &[&str]) -> String {
    match split_once_any_ci(text, phrases) {
        Some((before, after)) => format!("{before}{after}"),
        None => text.to_string(),
    }
}

/// Object substring for verb classes of the shape `<verb> X [with Y]`.
fn stripped_object<'a>(action: &'a str, verb: &str) -> &'a str {
    let rest = match split_once_any_ci(action, &[verb]) {
        Some((_, after)) => after,
        None => action,
    };
    split_all_ci(rest, &[" with "])[0]
}
