use askama::Template;

use super::views::{FortuneView, NoticeView};

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub version_info: &'static crate::VersionInfo,
    pub notices: Vec<NoticeView>,
    pub fortune: Option<FortuneView>,
}

#[derive(Template)]
#[template(path = "pages/setup.html")]
pub struct SetupTemplate {
    pub version_info: &'static crate::VersionInfo,
    pub missing_secrets: Vec<&'static str>,
}

pub fn render_template<T: Template>(template: T) -> Result<String, askama::Error> {
    template.render()
}
