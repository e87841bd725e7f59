//! Post counters mapper

use reaction_core::PostCounters;

use crate::models::PostCountersModel;

impl From<PostCountersModel> for PostCounters {
    fn from(model: PostCountersModel) -> Self {
        PostCounters::new(model.like_count, model.dislike_count)
    }
}
