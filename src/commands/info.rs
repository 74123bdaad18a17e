use photomania::{ImageSize, PhotoClient};

use super::describe;

pub(crate) fn cmd_info(
    client: &PhotoClient,
    id: u64,
    size: ImageSize,
    json: bool,
) -> anyhow::Result<()> {
    let photo = client.photo_info(id, size)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&photo)?);
    } else {
        print!("{}", describe(&photo));
    }
    Ok(())
}
