use reqwest::{Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    api::error::{ApiError, ApiResult},
    auth::{AuthError, Session},
    config,
    model::{
        ResourceType, ResourceTyped, RestResource, Validate,
        entity::{Course, Lesson, PassedExam, User, UserAnswer},
    },
};

/// Some endpoints wrap their payload in `{ "data": ... }`, others do not.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Plain(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Plain(data) => data,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error")]
    message: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(alias = "access_token")]
    token: String,
    #[serde(default)]
    user: Option<User>,
}

/// JSON-over-HTTP client of the LearnUp REST API.
///
/// Cloning is cheap, the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(api: &config::Api) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(api.timeout())
            .user_agent(concat!("learnup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: api.base_url().trim_end_matches('/').to_string(),
            session: None,
        })
    }

    pub fn with_base_url<S: Into<String>>(base_url: S) -> ApiResult<Self> {
        let base_url: String = base_url.into();
        Ok(Self {
            http: reqwest::Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(session) = &self.session {
            req = req.bearer_auth(session.bearer()?);
        }
        Ok(req)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        resource_type: ResourceType,
    ) -> ApiResult<T> {
        let body = self.send_raw(req, resource_type).await?;
        serde_json::from_str::<Envelope<T>>(&body)
            .map(Envelope::into_inner)
            .map_err(|error| ApiError::Decode {
                resource_type,
                error,
            })
    }

    async fn send_raw(&self, req: RequestBuilder, resource_type: ResourceType) -> ApiResult<String> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);
        tracing::debug!(%status, ?resource_type, "request failed: {message}");
        Err(ApiError::from_status(status, resource_type, message))
    }

    /// Exchanges credentials for a bearer token.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let req = self
            .request(Method::POST, "/login")?
            .json(&LoginRequest { email, password });
        let resp: LoginResponse = self.send(req, ResourceType::User).await?;

        let session = Session::from_token(resp.token)?;
        Ok(match resp.user {
            Some(user) => session.with_user(user),
            None => session,
        })
    }

    #[tracing::instrument(skip(self), fields(path = T::PATH))]
    pub async fn list<T: RestResource>(&self) -> ApiResult<Vec<T>> {
        let req = self.request(Method::GET, T::PATH)?;
        self.send(req, T::get_resource_type()).await
    }

    #[tracing::instrument(skip(self), fields(path = T::PATH))]
    pub async fn find_by_id<T: RestResource>(&self, id: i64) -> ApiResult<T> {
        let req = self.request(Method::GET, &format!("{}/{id}", T::PATH))?;
        self.send(req, T::get_resource_type()).await
    }

    #[tracing::instrument(skip(self, data), fields(path = T::PATH))]
    pub async fn create<T: RestResource>(&self, data: &T::Create) -> ApiResult<T> {
        data.validate()?;
        let req = self.request(Method::POST, T::PATH)?.json(data);
        let created: T = self.send(req, T::get_resource_type()).await?;
        tracing::debug!(id = created.resource_id(), "created");
        Ok(created)
    }

    #[tracing::instrument(skip(self, data), fields(path = T::PATH))]
    pub async fn update<T: RestResource>(&self, id: i64, data: &T::Create) -> ApiResult<T> {
        data.validate()?;
        let req = self
            .request(Method::PUT, &format!("{}/{id}", T::PATH))?
            .json(data);
        self.send(req, T::get_resource_type()).await
    }

    #[tracing::instrument(skip(self), fields(path = T::PATH))]
    pub async fn delete<T: RestResource>(&self, id: i64) -> ApiResult<()> {
        let req = self.request(Method::DELETE, &format!("{}/{id}", T::PATH))?;
        self.send_raw(req, T::get_resource_type()).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn course_lessons(&self, course_id: i64) -> ApiResult<Vec<Lesson>> {
        let req = self.request(Method::GET, &format!("/courses/{course_id}/lessons"))?;
        self.send(req, Lesson::get_resource_type()).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn specialty_courses(&self, specialty_id: i64) -> ApiResult<Vec<Course>> {
        let req = self.request(Method::GET, &format!("/specialties/{specialty_id}/courses"))?;
        self.send(req, Course::get_resource_type()).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn passed_exam_answers(&self, passed_exam_id: i64) -> ApiResult<Vec<UserAnswer>> {
        let req = self.request(
            Method::GET,
            &format!("{}/{passed_exam_id}/user-answers", PassedExam::PATH),
        )?;
        self.send(req, UserAnswer::get_resource_type()).await
    }

    /// Enrolls the signed-in user; refused locally without a session.
    #[tracing::instrument(skip(self))]
    pub async fn enroll(&self, course_id: i64) -> ApiResult<()> {
        if self.session.is_none() {
            return Err(AuthError::AuthenticationRequired.into());
        }
        let req = self.request(Method::POST, &format!("/courses/{course_id}/enroll"))?;
        self.send_raw(req, Course::get_resource_type()).await?;
        Ok(())
    }
}
