//! Translation
//!
//! 消息文本由翻译函数生成，核心只传入结构化数据（符号名、种类、位置、链接），
//! 从不检查返回的文本。

/// 翻译函数
pub trait Translator {
    /// 按键名生成文本，`{{name}}` 形式的占位符由 `substitutions` 填充
    fn translate(&self, key: &str, substitutions: &[(&str, String)]) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str, &[(&str, String)]) -> String,
{
    fn translate(&self, key: &str, substitutions: &[(&str, String)]) -> String {
        self(key, substitutions)
    }
}

/// 默认的英文文本
const ENGLISH: &[(&str, &str)] = &[
    (
        "fes.welcome",
        "Welcome! This is your friendly debugger. To turn me off, disable friendly errors in your easel settings.",
    ),
    ("fes.pre", "🌸 easel says: {{message}}"),
    ("fes.further_details", "+ More info: {{url}}"),
    (
        "fes.location",
        " (on line {{line}} in {{file}} [{{url}}:{{line}}:{{column}}])",
    ),
    (
        "fes.misspelling",
        "It seems that you may have accidentally written \"{{name}}\" instead of \"{{actualName}}\"{{location}}. Please correct it to {{actualName}} if you wish to use the {{type}} from easel.",
    ),
    ("fes.misspelling_alternatives", "You may also have meant: {{names}}"),
    (
        "fes.misused_top_level.global",
        "Did you just try to use easel's {{symbolName}} {{symbolType}}? If so, you may want to move it into your sketch's setup() function.",
    ),
    (
        "fes.misused_top_level.instance",
        "Did you just try to use easel's {{symbolName}} {{symbolType}}? If so, you may want to move it into the setup() function of the \"{{instance}}\" sketch.",
    ),
    (
        "fes.lifecycle_miscapitalized",
        "It seems that you may have accidentally written {{name}} instead of {{actualName}}. Please correct it if it's not intentional.",
    ),
];

/// 默认英文翻译
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishTranslator;

impl Translator for EnglishTranslator {
    fn translate(&self, key: &str, substitutions: &[(&str, String)]) -> String {
        match ENGLISH.iter().find(|(k, _)| *k == key) {
            Some((_, template)) => interpolate(template, substitutions),
            // 未知键原样返回
            None => key.to_string(),
        }
    }
}

/// 替换模板中的 `{{name}}` 占位符，未提供的占位符保持原样
pub fn interpolate(template: &str, substitutions: &[(&str, String)]) -> String {
    substitutions
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{{{}}}}}", name), value)
        })
}
