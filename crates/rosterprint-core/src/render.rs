//! HTML rendering of print pages.
//!
//! Produces one self-contained document with one A4 sheet per [`Page`].
//! Open it in a browser and print with margins set to none.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::config::Config;
use crate::layout::{LayoutMode, Page, PrintGroup, PHOTO_GRID_COLUMNS};
use crate::models::{Athlete, GroupKey};

/// Age classes with a checkbox on the photo board header.
const AGE_CHECKBOXES: [&str; 3] = ["8", "10", "12"];

const STYLE: &str = r#"
@page { size: A4; margin: 0; }
body { margin: 0; background: #eee; font-family: 'Angsana New', 'Sarabun', sans-serif; }
.sheet { width: 210mm; height: 297mm; box-sizing: border-box; margin: 0 auto 8mm; background: white;
  position: relative; display: flex; flex-direction: column; page-break-after: always; overflow: hidden; }
.sheet.photo { padding: 12mm 15mm 10mm 15mm; }
.sheet.list { padding: 15mm; }
.header { text-align: center; position: relative; }
.header h1 { font-size: 22pt; margin: 0; }
.header p { font-size: 18pt; margin: 2pt 0; }
.logo { position: absolute; top: 0; right: 0; width: 24mm; height: 24mm; object-fit: contain; }
.circle { display: inline-block; width: 12pt; height: 12pt; border: 1px solid black; border-radius: 50%;
  vertical-align: middle; margin: 0 4pt 0 16pt; }
.circle.active { background: black; box-shadow: inset 0 0 0 2px white; }
.grid { display: grid; grid-template-columns: repeat(5, 1fr); gap: 6mm 2mm; margin-top: 6mm; }
.cell { display: flex; flex-direction: column; align-items: center; font-size: 14pt; line-height: 1.1; }
.frame { width: 26mm; height: 32mm; border: 1px solid black; display: flex; align-items: center;
  justify-content: center; text-align: center; overflow: hidden; font-size: 13pt; }
.frame img { width: 100%; height: 100%; object-fit: cover; }
.field { width: 100%; display: flex; white-space: nowrap; overflow: hidden; }
.field span.value { flex: 1; border-bottom: 1px dotted black; margin-left: 2px; min-height: 1.2em; }
table.roster { width: 100%; border-collapse: collapse; font-size: 16pt; margin-top: 6mm; }
table.roster th, table.roster td { border: 1px solid black; padding: 4pt; height: 2.1em; }
table.roster td.center, table.roster th { text-align: center; }
.footer { margin-top: auto; font-size: 18pt; text-align: center; }
.signature { display: flex; justify-content: flex-end; padding: 8mm 10mm 10mm 0; }
.signature div { text-align: center; }
.signature .line { display: inline-block; width: 70mm; border-bottom: 1px dotted black; }
.page-no { position: absolute; bottom: 4mm; left: 6mm; font-size: 8pt; color: #bbb; }
@media print { body { background: white; } .sheet { margin: 0; } .page-no { display: none; } }
"#;

/// Fixed text printed on every sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintOptions {
    pub school_name: String,
    pub event_name: String,
    pub director_name: String,
    pub logo_url: Option<String>,
    pub show_signature: bool,
}

impl From<&Config> for PrintOptions {
    fn from(config: &Config) -> Self {
        Self {
            school_name: config.school_name.clone(),
            event_name: config.event_name.clone(),
            director_name: config.director_name.clone(),
            logo_url: config.logo_url.clone().filter(|url| !url.trim().is_empty()),
            show_signature: config.show_signature,
        }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Render every page of every group as one HTML document.
pub fn render_document(groups: &[PrintGroup<'_>], mode: LayoutMode, options: &PrintOptions) -> Markup {
    html! {
        (DOCTYPE)
        html lang="th" {
            head {
                meta charset="utf-8";
                title { (options.event_name) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                @for group in groups {
                    @for page in &group.pages {
                        @match mode {
                            LayoutMode::PhotoGrid => { (render_photo_page(&group.key, page, options)) }
                            LayoutMode::NameList => { (render_list_page(&group.key, page, options)) }
                        }
                    }
                }
            }
        }
    }
}

fn render_logo(options: &PrintOptions) -> Markup {
    html! {
        @if let Some(url) = &options.logo_url {
            img.logo src=(url) alt="";
        }
    }
}

fn render_signature(options: &PrintOptions) -> Markup {
    html! {
        @if options.show_signature {
            div.signature {
                div {
                    p { "ลงชื่อ " span.line {} }
                    p { "(" (options.director_name) ")" }
                    p { "ผู้อำนวยการสถานศึกษา " (options.school_name) }
                }
            }
        }
    }
}

fn render_page_number(key: &GroupKey, page: &Page<'_>) -> Markup {
    html! {
        div.page-no { "หน้า " (page.index + 1) " / " (page.page_count) " - " (key.label()) }
    }
}

fn render_photo_page(key: &GroupKey, page: &Page<'_>, options: &PrintOptions) -> Markup {
    html! {
        section.sheet.photo {
            div.header {
                (render_logo(options))
                h1 { "แผงรูปนักกีฬา" }
                p { "ทีม " b { (options.school_name) } }
                p { (options.event_name) }
                p { "รายการ " b { (key.sport) } }
                p {
                    "ประเภท"
                    @for age in AGE_CHECKBOXES {
                        span.circle.active[key.age == age] {}
                        (age) " ปี"
                    }
                }
            }
            div.grid style={ "grid-template-columns: repeat(" (PHOTO_GRID_COLUMNS) ", 1fr)" } {
                @for slot in &page.slots {
                    (render_photo_cell(*slot))
                }
            }
            div.footer {
                p { "ขอรับรองว่าตามรายชื่อและรูปถ่ายข้างบน เป็นนักเรียน" (options.school_name) " จริง" }
                p { "และขอรับรองว่า จะปฏิบัติตามหลักเกณฑ์การแข่งขันทุกประการ" }
            }
            (render_signature(options))
            (render_page_number(key, page))
        }
    }
}

fn render_photo_cell(athlete: Option<&Athlete>) -> Markup {
    let (first, last, born) = match athlete {
        Some(a) => (a.first_name(), a.last_name(), a.birth_date_display()),
        None => ("", "", String::new()),
    };

    html! {
        div.cell {
            div.frame {
                @match athlete.filter(|a| a.has_photo()) {
                    Some(a) => { img src=(a.image_url.trim()) alt=(a.name); }
                    None => { "ติดรูปถ่าย" br; "นักกีฬา" }
                }
            }
            div.field { "ชื่อ" span.value { (first) } }
            div.field { "สกุล" span.value { (last) } }
            div.field { "ว/ด/ป" span.value { (born) } }
        }
    }
}

fn render_list_page(key: &GroupKey, page: &Page<'_>, options: &PrintOptions) -> Markup {
    html! {
        section.sheet.list {
            div.header {
                (render_logo(options))
                h1 { "บัญชีรายชื่อนักกีฬา" }
                p { "ทีม " (options.school_name) }
                p { (options.event_name) }
                p { b { "รายการ: " (key.sport) " | รุ่นอายุ: " (key.age) " ปี | ประเภท: " (key.gender) } }
            }
            table.roster {
                thead {
                    tr { th { "ลำดับ" } th { "ชื่อ - นามสกุล" } th { "วัน/เดือน/ปีเกิด" } th { "หมายเหตุ" } }
                }
                tbody {
                    @for (i, slot) in page.slots.iter().enumerate() {
                        @match slot {
                            Some(a) => {
                                tr {
                                    td.center { (page.row_number(i)) }
                                    td { (a.name) }
                                    td.center { (list_birth_date(a)) }
                                    td {}
                                }
                            }
                            None => {
                                tr { td { (PreEscaped("&nbsp;")) } td {} td {} td {} }
                            }
                        }
                    }
                }
            }
            div.footer {
                p { "ขอรับรองว่ารายชื่อข้างต้นเป็นนักเรียนในสังกัด" (options.school_name) " จริง" }
            }
            (render_signature(options))
            (render_page_number(key, page))
        }
    }
}

fn list_birth_date(athlete: &Athlete) -> String {
    if athlete.birth_date.trim().is_empty() {
        "-".to_string()
    } else {
        athlete.birth_date_display()
    }
}
