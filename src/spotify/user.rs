use crate::types::User;

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves the profile of the user the access token belongs to.
    pub async fn get_current_user(&self) -> Result<User, reqwest::Error> {
        let request = self.http.get(self.url("/me"));
        self.execute(request).await?.json::<User>().await
    }
}
