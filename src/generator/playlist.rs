use crate::{Res, info, spotify::Catalog, success};

/// Page size used when listing the user's playlists.
pub const PLAYLIST_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlaylist {
    pub id: String,
    pub created: bool,
}

/// Returns the user's playlist called `name`, creating it when none exists.
///
/// Names are compared case-insensitively and the first match in the order
/// the service lists the playlists wins. Pages are followed through their
/// `next` cursor until one matches or the listing is exhausted; only then
/// the playlist is created, with `name` exactly as given. An existing
/// playlist is returned untouched.
pub async fn resolve_or_create<C: Catalog>(
    catalog: &C,
    user_id: &str,
    name: &str,
    public: Option<bool>,
) -> Res<ResolvedPlaylist> {
    let wanted = name.to_lowercase();
    let mut page = catalog.current_user_playlists(PLAYLIST_PAGE_SIZE).await?;

    loop {
        if let Some(found) = page.items.iter().find(|p| p.name.to_lowercase() == wanted) {
            info!("Found existing playlist: {}", name);
            return Ok(ResolvedPlaylist {
                id: found.id.clone(),
                created: false,
            });
        }

        match page.next {
            Some(next) => page = catalog.next_playlists(&next).await?,
            None => break,
        }
    }

    let playlist = catalog.create_playlist(user_id, name, public).await?;
    success!("Created new playlist: {}", name);

    Ok(ResolvedPlaylist {
        id: playlist.id,
        created: true,
    })
}
