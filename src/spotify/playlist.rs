use crate::types::{
    AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest, Page, Playlist,
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves the first page of playlists owned or followed by the user.
    ///
    /// # Arguments
    ///
    /// * `limit` - Page size (1-50)
    pub async fn get_playlists(&self, limit: u32) -> Result<Page<Playlist>, reqwest::Error> {
        let request = self
            .http
            .get(self.url("/me/playlists"))
            .query(&[("limit", limit)]);

        self.execute(request).await?.json::<Page<Playlist>>().await
    }

    /// Follows a `next` URL returned by a previous playlist page.
    pub async fn get_playlists_page(&self, next: &str) -> Result<Page<Playlist>, reqwest::Error> {
        let request = self.http.get(next);
        self.execute(request).await?.json::<Page<Playlist>>().await
    }

    /// Creates a playlist for `user_id`.
    ///
    /// The visibility flag is only sent when set, otherwise the service
    /// decides. No description is attached.
    pub async fn post_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: Option<bool>,
    ) -> Result<Playlist, reqwest::Error> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            public,
        };

        let request = self
            .http
            .post(self.url(&format!("/users/{user_id}/playlists")))
            .json(&body);

        self.execute(request).await?.json::<Playlist>().await
    }

    /// Appends tracks to a playlist in a single request and returns the
    /// playlist's new snapshot id. The endpoint accepts at most 100 URIs.
    pub async fn post_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<String, reqwest::Error> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };

        let request = self
            .http
            .post(self.url(&format!("/playlists/{playlist_id}/tracks")))
            .json(&body);

        let response = self.execute(request).await?;
        let json = response.json::<AddTrackToPlaylistResponse>().await?;

        Ok(json.snapshot_id)
    }
}
