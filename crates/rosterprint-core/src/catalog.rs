//! Sports offered at the event, per school level.
//!
//! Registration picks a sport from this list; its age brackets and gender
//! categories become the athlete's group key.

use crate::models::Level;

/// One sport and the brackets it is contested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SportOption {
    pub name: &'static str,
    pub sub_categories: &'static [&'static str],
    pub ages: &'static [&'static str],
    pub genders: &'static [&'static str],
}

const GENERAL: &[&str] = &["ทั่วไป"];
const BOYS_GIRLS: &[&str] = &["ชาย", "หญิง"];
const BOYS: &[&str] = &["ชาย"];
const GIRLS: &[&str] = &["หญิง"];
const MIXED: &[&str] = &["ผสม"];
const NO_AGE: &[&str] = &["ไม่ระบุ"];

const fn sport(
    name: &'static str,
    ages: &'static [&'static str],
    genders: &'static [&'static str],
) -> SportOption {
    SportOption {
        name,
        sub_categories: GENERAL,
        ages,
        genders,
    }
}

const EARLY: &[SportOption] = &[
    sport("จักรยานขาไถ", &["5", "7"], BOYS_GIRLS),
    sport("โยนบอล", &["6"], BOYS_GIRLS),
    sport("ฟุตบอล 7 คน", &["6"], MIXED),
    sport("เดินตัวหนอน", &["6"], MIXED),
    sport("ขว้างบอลไกล", &["6"], BOYS_GIRLS),
    sport("วิ่งเปรี้ยว", &["6"], &["ชาย 3 - หญิง 3"]),
];

const PRIMARY: &[SportOption] = &[
    sport("ฟุตบอล 7 คน", &["10", "12"], BOYS),
    sport("แชร์บอล", &["10"], GIRLS),
    sport("แฮนด์บอล", &["12"], GIRLS),
    sport("วอลเลย์บอล", &["12"], BOYS_GIRLS),
    sport("ตะกร้อ", &["12"], BOYS_GIRLS),
    sport("ฟุตซอล", &["12"], BOYS),
    sport("เปตอง ทีม", &["12"], BOYS_GIRLS),
    sport("เทเบิลเทนนิส", &["12"], BOYS_GIRLS),
    sport("หมากรุก", &["12"], BOYS_GIRLS),
    sport("หมากฮอส", &["12"], BOYS_GIRLS),
    sport("ชักเยอ", &["12"], BOYS_GIRLS),
];

const ATHLETICS_NO_AGE: &[SportOption] = &[
    sport("วิ่ง 30 ม.", NO_AGE, BOYS_GIRLS),
    sport("วิ่ง 40 ม.", NO_AGE, BOYS_GIRLS),
    sport("วิ่ง 50 ม.", NO_AGE, BOYS_GIRLS),
    sport("วิ่งผลัด 4×25 ม.", NO_AGE, BOYS_GIRLS),
];

const ATHLETICS_AGE: &[SportOption] = &[
    sport("วิ่ง 60 ม.", &["8"], BOYS_GIRLS),
    sport("วิ่ง 80 ม.", &["10", "12"], BOYS_GIRLS),
    sport("วิ่ง 100 ม.", &["12"], BOYS_GIRLS),
    sport("วิ่งผลัด 8×50 ม.", &["8"], BOYS_GIRLS),
    sport("วิ่งผลัด 4×100 ม.", &["12"], BOYS_GIRLS),
];

/// Sports offered at `level`, in form order.
pub fn sports_for(level: Level) -> &'static [SportOption] {
    match level {
        Level::Early => EARLY,
        Level::Primary => PRIMARY,
        Level::AthleticsNoAge => ATHLETICS_NO_AGE,
        Level::AthleticsAge => ATHLETICS_AGE,
    }
}

pub fn find_sport(level: Level, name: &str) -> Option<&'static SportOption> {
    let name = name.trim();
    sports_for(level).iter().find(|s| s.name == name)
}
