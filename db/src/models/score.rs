use chrono::{DateTime, Utc};
use diesel::{ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::schema::scores;

pub const SCORE_MIN: i32 = 1;
pub const SCORE_MAX: i32 = 20;

#[derive(Debug, Queryable, Identifiable, Serialize, Deserialize)]
pub struct Score {
    pub id: i32,
    pub judge_id: i32,
    pub application_id: i32,
    pub influence: i32,
    pub creativity: i32,
    pub validity: i32,
    pub relevance: i32,
    pub presentation: i32,
    pub round_influence: i32,
    pub round_creativity: i32,
    pub round_validity: i32,
    pub round_relevance: i32,
    pub round_presentation: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The five rubric dimensions as submitted by a judge.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ScoreValues {
    pub influence: i32,
    pub creativity: i32,
    pub validity: i32,
    pub relevance: i32,
    pub presentation: i32,
}

#[derive(Insertable)]
#[table_name = "scores"]
struct NewScore {
    judge_id: i32,
    application_id: i32,
    influence: i32,
    creativity: i32,
    validity: i32,
    relevance: i32,
    presentation: i32,
    round_influence: i32,
    round_creativity: i32,
    round_validity: i32,
    round_relevance: i32,
    round_presentation: i32,
}

impl Score {
    /// Upsert keyed on (judge, application). Each dimension is clamped into
    /// the rubric range; the round_* columns mirror the raw values (stored
    /// alongside, currently unused beyond storage).
    pub fn upsert(
        connection: &PgConnection,
        judge_id: i32,
        application_id: i32,
        values: &ScoreValues,
    ) -> Result<Score, Error> {
        let influence = clamp(values.influence);
        let creativity = clamp(values.creativity);
        let validity = clamp(values.validity);
        let relevance = clamp(values.relevance);
        let presentation = clamp(values.presentation);

        let score = diesel::insert_into(scores::table)
            .values(NewScore {
                judge_id,
                application_id,
                influence,
                creativity,
                validity,
                relevance,
                presentation,
                round_influence: influence,
                round_creativity: creativity,
                round_validity: validity,
                round_relevance: relevance,
                round_presentation: presentation,
            })
            .on_conflict((scores::judge_id, scores::application_id))
            .do_update()
            .set((
                scores::influence.eq(influence),
                scores::creativity.eq(creativity),
                scores::validity.eq(validity),
                scores::relevance.eq(relevance),
                scores::presentation.eq(presentation),
                scores::round_influence.eq(influence),
                scores::round_creativity.eq(creativity),
                scores::round_validity.eq(validity),
                scores::round_relevance.eq(relevance),
                scores::round_presentation.eq(presentation),
                scores::updated_at.eq(Utc::now()),
            ))
            .get_result(connection)?;

        Ok(score)
    }

    /// Retract-and-redo: unchecking the confirm mark deletes the row so the
    /// team reopens for scoring. No history is kept. Idempotent.
    pub fn retract(
        connection: &PgConnection,
        judge_id: i32,
        application_id: i32,
    ) -> Result<(), Error> {
        use crate::schema::scores::dsl::{
            application_id as application_id_field, judge_id as judge_id_field,
            scores as scores_table,
        };

        diesel::delete(
            scores_table
                .filter(judge_id_field.eq(judge_id))
                .filter(application_id_field.eq(application_id)),
        )
        .execute(connection)?;

        Ok(())
    }

    pub fn find(
        connection: &PgConnection,
        judge_id: i32,
        application_id: i32,
    ) -> Result<Option<Score>, Error> {
        use crate::schema::scores::dsl::{
            application_id as application_id_field, judge_id as judge_id_field,
            scores as scores_table,
        };

        let score = scores_table
            .filter(judge_id_field.eq(judge_id))
            .filter(application_id_field.eq(application_id))
            .first::<Score>(connection)
            .optional()?;

        Ok(score)
    }
}

fn clamp(value: i32) -> i32 {
    value.max(SCORE_MIN).min(SCORE_MAX)
}
