/// Load variables from a `.env` file when one is present.
///
/// A missing file is not an error: deployed environments configure the
/// process directly.
pub async fn init_env() {
    let _ = dotenvy::dotenv();
}
