use crate::types::{SearchTracksResponse, Track};

use super::SpotifyClient;

impl SpotifyClient {
    /// Searches the catalog for tracks.
    ///
    /// `query` uses Spotify's field filter syntax, e.g. `artist:Pantera`.
    /// The result keeps the order of the service's relevance ranking.
    ///
    /// # Arguments
    ///
    /// * `query` - Search query, encoded by the client
    /// * `limit` - Maximum number of tracks to return (1-50)
    pub async fn search_track_items(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Track>, reqwest::Error> {
        let limit = limit.to_string();
        let request = self.http.get(self.url("/search")).query(&[
            ("q", query),
            ("type", "track"),
            ("limit", limit.as_str()),
        ]);

        let response = self.execute(request).await?;
        let json = response.json::<SearchTracksResponse>().await?;

        Ok(json.tracks.items)
    }
}
