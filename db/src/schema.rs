table! {
    participant_applications (id) {
        id -> Int4,
        user_id -> Int4,
        data -> Nullable<Text>,
        final_score -> Nullable<Float8>,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    project_rooms (id) {
        id -> Int4,
        project_id -> Int4,
        room_id -> Int4,
        created_at -> Timestamptz,
    }
}

table! {
    projects (id) {
        id -> Int4,
        participant_id -> Int4,
        title -> Varchar,
        description -> Text,
        team_data -> Nullable<Text>,
        updated_at -> Timestamptz,
    }
}

table! {
    room_users (id) {
        id -> Int4,
        user_id -> Int4,
        room_id -> Int4,
        created_at -> Timestamptz,
    }
}

table! {
    rooms (id) {
        id -> Int4,
        name -> Varchar,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

table! {
    scores (id) {
        id -> Int4,
        judge_id -> Int4,
        application_id -> Int4,
        influence -> Int4,
        creativity -> Int4,
        validity -> Int4,
        relevance -> Int4,
        presentation -> Int4,
        round_influence -> Int4,
        round_creativity -> Int4,
        round_validity -> Int4,
        round_relevance -> Int4,
        round_presentation -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    sessions (id) {
        id -> Int4,
        user_id -> Int4,
        token -> Varchar,
        expires_at -> Timestamptz,
        created_at -> Timestamptz,
    }
}

table! {
    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        role -> Varchar,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

joinable!(participant_applications -> users (user_id));
joinable!(project_rooms -> projects (project_id));
joinable!(project_rooms -> rooms (room_id));
joinable!(projects -> users (participant_id));
joinable!(room_users -> rooms (room_id));
joinable!(room_users -> users (user_id));
joinable!(scores -> participant_applications (application_id));
joinable!(scores -> users (judge_id));
joinable!(sessions -> users (user_id));

allow_tables_to_appear_in_same_query!(
    participant_applications,
    project_rooms,
    projects,
    room_users,
    rooms,
    scores,
    sessions,
    users,
);
