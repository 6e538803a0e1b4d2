//! Translation dictionaries

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

use super::Language;

const EN: &[(&str, &str)] = &[
    ("app.name", "CarePrep"),
    ("app.tagline", "Your surgery journey, step by step"),
    ("app.version", "Version {version}"),
    ("status.loading", "Loading..."),
    ("status.configuring_profile", "Configuring your profile..."),
    ("status.awaiting_email", "Please confirm your email address ({email})"),
    ("auth.sign_in", "Sign in"),
    ("auth.sign_up", "Create account"),
    ("auth.reset_password", "Reset password"),
    ("dashboard.welcome", "Welcome back, {name}"),
    ("dashboard.quick_actions", "Quick actions"),
    ("dashboard.recent_activity", "Recent activity"),
    ("countdown.title", "Countdown to surgery"),
    ("countdown.days", "Days"),
    ("countdown.hours", "Hours"),
    ("countdown.minutes", "Minutes"),
    ("countdown.seconds", "Seconds"),
    ("countdown.today", "Surgery day"),
    ("countdown.passed", "{days} days since surgery"),
    ("progress.title", "Your progress"),
    ("progress.summary", "{completed} of {total} tasks completed"),
    ("progress.overdue", "{count} overdue"),
    ("tasks.preparation", "Preparation"),
    ("tasks.recovery", "Recovery"),
    ("images.quotation", "Quotation"),
    ("images.progress", "Progress photos"),
    ("images.medical", "Medical records"),
    ("images.identification", "Identification"),
    ("language.en", "English"),
    ("language.th", "Thai"),
];

const TH: &[(&str, &str)] = &[
    ("app.name", "CarePrep"),
    ("app.tagline", "เส้นทางการผ่าตัดของคุณ ทีละขั้นตอน"),
    ("status.loading", "กำลังโหลด..."),
    ("status.configuring_profile", "กำลังตั้งค่าโปรไฟล์ของคุณ..."),
    ("status.awaiting_email", "กรุณายืนยันอีเมลของคุณ ({email})"),
    ("auth.sign_in", "เข้าสู่ระบบ"),
    ("auth.sign_up", "สร้างบัญชี"),
    ("auth.reset_password", "รีเซ็ตรหัสผ่าน"),
    ("dashboard.welcome", "ยินดีต้อนรับกลับ {name}"),
    ("dashboard.quick_actions", "การดำเนินการด่วน"),
    ("dashboard.recent_activity", "กิจกรรมล่าสุด"),
    ("countdown.title", "นับถอยหลังสู่วันผ่าตัด"),
    ("countdown.days", "วัน"),
    ("countdown.hours", "ชั่วโมง"),
    ("countdown.minutes", "นาที"),
    ("countdown.seconds", "วินาที"),
    ("countdown.today", "วันผ่าตัด"),
    ("countdown.passed", "ผ่านการผ่าตัดมาแล้ว {days} วัน"),
    ("progress.title", "ความคืบหน้าของคุณ"),
    ("progress.summary", "ทำเสร็จแล้ว {completed} จาก {total} งาน"),
    ("progress.overdue", "เลยกำหนด {count} งาน"),
    ("tasks.preparation", "การเตรียมตัว"),
    ("tasks.recovery", "การพักฟื้น"),
    ("images.quotation", "ใบเสนอราคา"),
    ("images.progress", "ภาพความคืบหน้า"),
    ("images.medical", "เอกสารทางการแพทย์"),
    ("images.identification", "เอกสารยืนยันตัวตน"),
    ("language.en", "อังกฤษ"),
    ("language.th", "ไทย"),
];

fn dictionary(language: Language) -> &'static HashMap<&'static str, &'static str> {
    static EN_DICT: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static TH_DICT: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    match language {
        Language::En => EN_DICT.get_or_init(|| EN.iter().copied().collect()),
        Language::Th => TH_DICT.get_or_init(|| TH.iter().copied().collect()),
    }
}

/// Template for `key`, falling back to the default language
pub fn lookup(language: Language, key: &str) -> Option<&'static str> {
    dictionary(language)
        .get(key)
        .or_else(|| dictionary(Language::default()).get(key))
        .copied()
}

/// Replace `{name}` placeholders; unknown placeholders are left as written
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

    if params.is_empty() {
        return template.to_string();
    }

    let re = PLACEHOLDER.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("valid placeholder regex"));
    re.replace_all(template, |caps: &Captures| {
        params
            .iter()
            .find(|(name, _)| *name == &caps[1])
            .map(|(_, value)| value.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}
