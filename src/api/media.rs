//! Recorded snapshots and movies.

use super::endpoints;
use super::types::{DeleteResult, MediaItem, MoviesResponse, PicturesResponse};
use super::daemon_result;
use crate::{MotionClient, Result};

impl MotionClient {
    /// Most recent snapshots of a camera, newest first (the daemon caps the list at 100).
    pub async fn pictures(&self, cam: u32) -> Result<Vec<MediaItem>> {
        let value = self.get(&endpoints::pictures(cam)).await?;
        Ok(daemon_result::<PicturesResponse>(value)?.pictures)
    }

    /// Most recent movies of a camera, newest first.
    pub async fn movies(&self, cam: u32) -> Result<Vec<MediaItem>> {
        let value = self.get(&endpoints::movies(cam)).await?;
        Ok(daemon_result::<MoviesResponse>(value)?.movies)
    }

    /// Delete a snapshot file and its database record.
    pub async fn delete_picture(&self, cam: u32, id: u64) -> Result<DeleteResult> {
        daemon_result(self.delete(&endpoints::picture(cam, id)).await?)
    }

    pub async fn delete_movie(&self, cam: u32, id: u64) -> Result<DeleteResult> {
        daemon_result(self.delete(&endpoints::movie(cam, id)).await?)
    }
}
