use askama::Template;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub app_name: String,
}

#[derive(Template)]
#[template(path = "signin.html")]
pub struct SignInTemplate {
    pub app_name: String,
    pub csrf_token: String,
    pub email: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignUpTemplate {
    pub app_name: String,
    pub csrf_token: String,
    pub full_name: String,
    pub email: String,
    pub errors: Vec<String>,
    pub success: Option<String>,
}

#[derive(Template)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate {
    pub app_name: String,
}
