pub mod kakao_local;
pub mod kakao_mobility;

use crate::error::{invalid_input_error, upstream_error, Error};

fn check_status(res: &reqwest::Response) -> Result<(), Error> {
    let status_code = res.status().as_u16();

    if (400..500).contains(&status_code) {
        tracing::warn!(status_code, "upstream rejected request");
        return Err(invalid_input_error());
    } else if status_code != 200 {
        tracing::warn!(status_code, "upstream failed");
        return Err(upstream_error());
    }

    Ok(())
}
