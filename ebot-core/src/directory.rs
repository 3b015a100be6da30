//! Directory abstraction for roster and team lookups.

use crate::error::Result;
use crate::types::{Activity, ChannelInfo, Member, TeamDetails};
use async_trait::async_trait;

/// Capability to query the platform directory for the conversation an activity arrived
/// on. Team-scoped lookups fail with [`crate::HandlerError::NotInTeam`] when the
/// activity did not originate in a team.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Lists the members of the activity's conversation.
    async fn conversation_members(&self, activity: &Activity) -> Result<Vec<Member>>;

    /// Lists the channels of the team the activity originated in.
    async fn team_channels(&self, activity: &Activity) -> Result<Vec<ChannelInfo>>;

    /// Fetches metadata for the team the activity originated in.
    async fn team_details(&self, activity: &Activity) -> Result<TeamDetails>;
}
