use std::{fmt, fs, path::Path};

use oauth2::{basic::BasicClient, AuthUrl, Client, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use serde::Deserialize;
use serde_json::Value;

use crate::{AppResult, GetField};

type HappyClient = Client<oauth2::StandardErrorResponse<oauth2::basic::BasicErrorResponseType>, oauth2::StandardTokenResponse<oauth2::EmptyExtraTokenFields, oauth2::basic::BasicTokenType>, oauth2::StandardTokenIntrospectionResponse<oauth2::EmptyExtraTokenFields, oauth2::basic::BasicTokenType>, oauth2::StandardRevocableToken, oauth2::StandardErrorResponse<oauth2::RevocationErrorResponseType>, oauth2::EndpointSet, oauth2::EndpointNotSet, oauth2::EndpointNotSet, oauth2::EndpointNotSet, oauth2::EndpointSet>;

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ClientProvider {
    Google,
    Github,
}

impl ClientProvider {
    pub fn id(&self) -> &str {
        use ClientProvider::*;
        match self {
            Google => "google.com",
            Github => "github.com",
        }
    }

    pub fn slug(&self) -> &str {
        use ClientProvider::*;
        match self {
            Google => "google",
            Github => "github",
        }
    }

    pub(crate) fn userinfo_url(&self) -> &str {
        use ClientProvider::*;
        match self {
            Google => "https://openidconnect.googleapis.com/v1/userinfo",
            Github => "https://api.github.com/user",
        }
    }

    pub(crate) fn subject(&self, userinfo: &Value) -> AppResult<String> {
        use ClientProvider::*;
        match self {
            Google => userinfo.get_str_field("sub"),
            Github => Ok(userinfo
                .get_obj_field("id")?
                .as_i64()
                .ok_or(format!("expected id in {userinfo} to be a number"))?
                .to_string()),
        }
    }
}

impl fmt::Display for ClientProvider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Clone)]
pub struct Clients {
    google_client: Option<HappyClient>,
    github_client: Option<HappyClient>,
}

impl Clients {
    pub fn load(path: impl AsRef<Path>) -> AppResult<Clients> {
        let json = serde_json::from_str(&fs::read_to_string(path)?)?;
        Self::from_json(json)
    }

    pub fn from_json(json: Value) -> AppResult<Clients> {
        let public_url =
            dotenv::var("PUBLIC_URL").unwrap_or_else(|_| "http://localhost:8080".to_owned());

        let google_client = 'a: {
            let json = json.get("google");
            let Some(json) = json else {
                break 'a None;
            };
            let client_id = ClientId::new(json.get_str_field("client_id")?);
            let client_secret = ClientSecret::new(json.get_str_field("client_secret")?);

            let auth_url = AuthUrl::new("https://accounts.google.com/o/oauth2/auth".to_string())?;
            let token_url = TokenUrl::new("https://oauth2.googleapis.com/token".to_string())?;
            let redirect_url = RedirectUrl::new(format!("{public_url}/auth/callback/google"))?;

            Some(
                BasicClient::new(client_id)
                .set_client_secret(client_secret)
                .set_auth_uri(auth_url)
                .set_token_uri(token_url)
                .set_redirect_uri(redirect_url)
            )
        };
        let github_client = 'a: {
            let json = json.get("github");
            let Some(json) = json else {
                break 'a None;
            };
            let client_id = ClientId::new(json.get_str_field("client_id")?);
            let client_secret = ClientSecret::new(json.get_str_field("client_secret")?);

            let auth_url = AuthUrl::new("https://github.com/login/oauth/authorize".to_string())?;
            let token_url = TokenUrl::new("https://github.com/login/oauth/access_token".to_string())?;
            let redirect_url = RedirectUrl::new(format!("{public_url}/auth/callback/github"))?;

            Some(
                BasicClient::new(client_id)
                .set_client_secret(client_secret)
                .set_auth_uri(auth_url)
                .set_token_uri(token_url)
                .set_redirect_uri(redirect_url)
            )
        };

        Ok(
            Clients {
                google_client,
                github_client,
            }
        )
    }

    pub fn get_client(&self, provider: ClientProvider) -> AppResult<HappyClient> {
        use ClientProvider::*;
        match provider {
            Google => self.google_client.clone(),
            Github => self.github_client.clone(),
        }.ok_or(format!("OAuth provider {provider} keys not supplied").into())
    }

    pub(crate) fn available(&self) -> Vec<ClientProvider> {
        let mut providers = Vec::new();
        if self.google_client.is_some() {
            providers.push(ClientProvider::Google);
        }
        if self.github_client.is_some() {
            providers.push(ClientProvider::Github);
        }
        providers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_provider_keys_are_not_offered() {
        let clients = Clients::from_json(serde_json::json!({
            "google": {"client_id": "cid", "client_secret": "shh"}
        }))
        .unwrap();

        assert!(clients.get_client(ClientProvider::Google).is_ok());
        assert!(clients.get_client(ClientProvider::Github).is_err());
        assert_eq!(clients.available().len(), 1);
    }

    #[test]
    fn subject_per_provider_shape() {
        let google = serde_json::json!({"sub": "110248495921238986420"});
        assert_eq!(
            ClientProvider::Google.subject(&google).unwrap(),
            "110248495921238986420"
        );

        let github = serde_json::json!({"id": 583231, "login": "octocat"});
        assert_eq!(ClientProvider::Github.subject(&github).unwrap(), "583231");

        assert!(ClientProvider::Github.subject(&google).is_err());
    }
}
