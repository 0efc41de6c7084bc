diesel::table! {
    recipes (id) {
        id -> Uuid,
        name -> Text,
        tags -> Array<Text>,
        ingredients -> Array<Text>,
        instructions -> Array<Text>,
        published_at -> Timestamptz,
    }
}
