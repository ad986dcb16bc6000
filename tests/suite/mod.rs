mod landing;
mod sequencing;
