// WHY: The product ships with a fixed rules glossary; compiled once and shared read-only

use anyhow::Result;
use std::sync::OnceLock;

use super::KeywordDictionary;

/// Rules keywords in display priority order, with their hover explanations
/// Some terms nest inside others (风怒 / 超级风怒, 法术 / 法术伤害) on purpose
pub const BUILTIN_KEYWORDS: &[(&str, &str)] = &[
    ("登场", "从手牌中打出此牌时触发的效果。"),
    ("遗愿", "此牌被消灭后触发的效果。"),
    ("嘲讽", "敌方必须优先攻击具有嘲讽的角色。"),
    ("冲锋", "可以在进场的回合立即攻击。"),
    ("突袭", "可以在进场的回合攻击随从，但不能攻击英雄。"),
    ("圣盾", "抵消受到的第一次伤害。"),
    ("风怒", "每回合可以攻击两次。"),
    ("超级风怒", "每回合可以攻击四次。"),
    ("潜行", "在攻击或造成伤害前无法被选为目标。"),
    ("剧毒", "对随从造成的任何伤害都会将其消灭。"),
    ("吸血", "造成伤害时，为你的英雄恢复等量的生命值。"),
    ("复生", "第一次死亡时以1点生命值复活。"),
    ("冻结", "被冻结的角色会错过其下一次攻击。"),
    ("沉默", "移除随从的所有卡牌文本和增益效果。"),
    ("免疫", "不会受到任何伤害。"),
    ("发现", "从三张随机卡牌中选择一张置入手牌。"),
    ("抉择", "从两个效果中选择一个。"),
    ("连击", "如果本回合已经使用过其他牌，则获得额外效果。"),
    ("过载", "下个回合的可用法力值减少相应的数值。"),
    ("法术", "使用后立即生效并进入弃牌堆的卡牌。"),
    ("法术伤害", "你的法术造成额外的伤害。"),
    ("法术迸发", "在你本回合首次施放法术后触发，仅限一次。"),
    ("回响", "打出后，本回合可以重复使用此牌的临时复制。"),
    ("休眠", "在指定回合数内无法行动，也无法被攻击。"),
    ("流放", "从手牌的最左侧或最右侧打出时获得额外效果。"),
    ("暴怒", "受到伤害并存活后触发。"),
    ("激励", "每当你使用英雄技能时触发。"),
    ("磁力", "可以吸附在友方机械随从的左侧，与其合为一体。"),
    ("奥秘", "在对手的回合满足特定条件时揭示并触发。"),
    ("任务", "完成指定目标后获得奖励。"),
    ("光环", "在场上时持续生效的效果。"),
];

static BUILTIN: OnceLock<KeywordDictionary> = OnceLock::new();

/// Shared built-in dictionary, compiled on first use
pub fn builtin_dictionary() -> Result<&'static KeywordDictionary> {
    if let Some(dictionary) = BUILTIN.get() {
        return Ok(dictionary);
    }
    let dictionary = KeywordDictionary::from_pairs(BUILTIN_KEYWORDS)?;
    Ok(BUILTIN.get_or_init(|| dictionary))
}
